//! Generation prompt for the itinerary model

use crate::models::TripRequest;

/// Build the instruction sent to the model.
///
/// `total_days` must already be capped; the response layout requested here
/// is what the normalizer expects.
#[must_use]
pub fn build_itinerary_prompt(request: &TripRequest, total_days: u32, currency: &str) -> String {
    let mut prompt = format!(
        "Create a {total_days}-day travel itinerary for a trip to {}.\n",
        request.location.trim()
    );

    if let (Some(start), Some(end)) = (&request.start_date, &request.end_date) {
        prompt.push_str(&format!("Travel dates: {start} to {end}.\n"));
    }
    if !request.start_time.is_empty() || !request.end_time.is_empty() {
        prompt.push_str(&format!(
            "Daily activities should run between {} and {}.\n",
            or_flexible(&request.start_time),
            or_flexible(&request.end_time)
        ));
    }
    prompt.push_str(&format!(
        "Group size: {} {}.\n",
        request.participants,
        if request.participants == 1 { "person" } else { "people" }
    ));
    if request.budget > 0 {
        prompt.push_str(&format!("Total budget: {currency}{}.\n", request.budget));
    }
    if !request.trip_type.is_empty() {
        prompt.push_str(&format!("Trip type: {}.\n", request.trip_type));
    }
    if !request.range.is_empty() {
        prompt.push_str(&format!("Travel range: {}.\n", request.range));
    }

    prompt.push_str(&format!(
        "\nFormat the answer as plain text with exactly {total_days} sections labeled \
         \"Day 1:\" through \"Day {total_days}:\". Under each day list the activities in \
         chronological order, one per line, each starting with \"- \". Keep each activity \
         under 200 characters.\n\
         After the last day add a section starting with \"Cost Summary:\" that lists the \
         estimated costs per category (accommodation, food, transport, activities) and a \
         total, one per line, each amount written with the {currency} symbol.\n"
    ));

    prompt
}

fn or_flexible(time: &str) -> &str {
    if time.is_empty() { "flexible" } else { time }
}
