//! Plain-text views of a workflow snapshot

use std::fmt;

use trip_workflow::{DestinationOption, WorkflowState};

/// Destination options, one block per destination
pub struct Options<'a>(pub &'a WorkflowState);

impl fmt::Display for Options<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for option in self.0.options.values() {
            write_option(f, option)?;
        }
        Ok(())
    }
}

fn write_option(f: &mut fmt::Formatter<'_>, option: &DestinationOption) -> fmt::Result {
    let flight = if option.is_direct_flight {
        "direct"
    } else {
        "with stops"
    };
    writeln!(f, "{}", option.destination)?;
    writeln!(
        f,
        "  Flight: {} -> {} ({}) {}",
        option.depart_airport_code,
        option.destination_airport_code,
        flight,
        option.flight_numbers.join(", ")
    )?;
    if !option.total_duration.is_empty() {
        writeln!(f, "  Duration: {}", option.total_duration)?;
    }
    write!(f, "  Hotel: {}", option.hotel_name)?;
    if let Some(rating) = option.hotel_rating {
        write!(f, " ({rating:.1})")?;
    }
    writeln!(f, ", {}", option.hotel_address)?;
    writeln!(f, "  Remaining budget: {:.2}", option.remaining_budget)
}

/// Daily plan rows as "Day i: activities"
pub struct Plan<'a>(pub &'a WorkflowState);

impl fmt::Display for Plan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(plan) = &self.0.plan else {
            return Ok(());
        };
        writeln!(
            f,
            "Daily plan for {} ({} days)",
            plan.destination,
            plan.criteria.trip_days()
        )?;
        for (label, activities) in self.0.day_rows() {
            writeln!(f, "{}: {}", label, activities)?;
        }
        Ok(())
    }
}

/// Image links, numbered from 1
pub struct Images<'a>(pub &'a WorkflowState);

impl fmt::Display for Images<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, url) in self.0.images.iter().enumerate() {
            writeln!(f, "View Image {}: {}", index + 1, url)?;
        }
        Ok(())
    }
}
