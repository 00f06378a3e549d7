//! Rule-based responder behind the chat widget, shared by the WebSocket
//! endpoint and the HTTP fallback.

/// Rule lists checked in order; the first list with a substring hit in the
/// lowercased message decides the reply.
const GREETINGS: &[&str] = &["hi", "hello", "hey", "greetings"];
const HELP_COMMANDS: &[&str] = &["help", "what can you do", "how does this work"];
const SEARCH_HELP: &[&str] = &["search", "how to search", "find location"];
const FORM_HELP: &[&str] = &["form", "submit", "business", "crowd intensity"];

const GREETING_REPLY: &str =
    "Hello! I'm here to help you navigate the Crowd Heatmap application. How can I assist you today?";

const HELP_REPLY: &str = "I can help you with:
1. Searching for locations - Use the search field in the top panel
2. Finding your location - Click the 'Find My Location' button
3. Finding popular places - Click 'Find Popular Places' to see places within 5km
4. Submitting your business information - Fill out the form with your details and preferred crowd intensity
5. Understanding crowd intensity levels - High, Medium, or Low based on your business needs";

const SEARCH_REPLY: &str = "To search for a location, type in the search field at the top. The map will show results from OpenStreetMap. You can click on any result to see it on the map.";

const FORM_REPLY: &str = "The form collects your business information:
- Personal details: Name, Email, Phone
- Business Type: What kind of business you're starting
- Crowd Intensity:
  * High: For businesses that need high foot traffic
  * Medium: For businesses that prefer moderate crowd levels
  * Low: For businesses that work better in quieter areas";

const ACCURACY_REPLY: &str = "The accuracy meter shows how accurate the location data is compared to OpenStreetMap. Higher accuracy means more reliable location information.";

const MAP_REPLY: &str = "The map uses OpenStreetMap. You can click and drag to move around, use the +/- buttons to zoom, and click the minimize/maximize button to toggle the map size.";

const FALLBACK_REPLY: &str = "I'm here to help! Try asking about: searching locations, finding your location, popular places, submitting forms, or understanding crowd intensity. Or type 'help' for more information.";

/// Reply to a chat message. Matching is substring-based on the lowercased,
/// trimmed message, and total: unmatched messages get the fallback reply.
pub fn reply(message: &str) -> &'static str {
    let message = message.to_lowercase();
    let message = message.trim();
    let hits = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if hits(GREETINGS) {
        GREETING_REPLY
    } else if hits(HELP_COMMANDS) {
        HELP_REPLY
    } else if hits(SEARCH_HELP) {
        SEARCH_REPLY
    } else if hits(FORM_HELP) {
        FORM_REPLY
    } else if message.contains("accuracy") || message.contains("meter") {
        ACCURACY_REPLY
    } else if message.contains("map") {
        MAP_REPLY
    } else {
        FALLBACK_REPLY
    }
}
