/// The system prompt sent with every photo.
///
/// It asks for the "INGREDIENTS FOUND:" / "RECIPES:" layout that the
/// structured parser tier understands. `{location}` is replaced with where the
/// photo was taken. Loaded from `prompt.txt` at compile time.
pub const ANALYSIS_PROMPT: &str = include_str!("prompt.txt");

const DEFAULT_LOCATION: &str = "fridge";

fn location_or_default(location: &str) -> &str {
    match location.trim() {
        "" => DEFAULT_LOCATION,
        trimmed => trimmed,
    }
}

/// System prompt for a photo of `location` ("fridge", "pantry", ...).
pub fn build_analysis_prompt(location: &str) -> String {
    ANALYSIS_PROMPT.replace("{location}", location_or_default(location))
}

/// The user-turn text that accompanies the image.
pub fn build_user_message(location: &str) -> String {
    let location = location_or_default(location);
    format!(
        "Analyze my {location} photo. What ingredients do you see? Then suggest recipes using primarily these visible ingredients, and tell me exactly which ingredients from the photo each recipe uses."
    )
}
