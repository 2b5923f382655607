use crate::models::{BookSpec, Prompt};

/// Builds the autobiography instruction for the model.
///
/// The six fields are interpolated verbatim. The template asks for a chapter
/// title-only table of contents first, then the full first-person narrative.
pub fn build_prompt(spec: &BookSpec) -> Prompt {
    let BookSpec {
        title,
        subtitle,
        author,
        style,
        language,
        length,
    } = spec;

    Prompt::new(format!(
        "You are an advanced AI specializing in crafting deeply engaging autobiographies.\n\
         Your task is to generate a high-quality, immersive, and emotionally resonant autobiography based on the given details.\n\
         \n\
         Book Specifications:\n\
         - Title: {title}\n\
         - Subtitle: {subtitle}\n\
         - Author: {author}\n\
         - Writing Style: {style} (Engaging, immersive, first-person storytelling)\n\
         - Language: {language}\n\
         - Target Length: {length} words (Ensure a detailed, comprehensive narrative)\n\
         \n\
         Step 1: Book Structure & Table of Contents\n\
         First, generate a structured Table of Contents with only concise chapter headings.\n\
         - Each chapter should have only a title, without any extra descriptions.\n\
         - The structure should cover all key phases of the author's journey.\n\
         \n\
         Example:\n\
         \n\
         Table of Contents:\n\
         1. Early Days & Childhood\n\
         2. First Struggles\n\
         3. Breakthrough Moments\n\
         4. Reflections & Lessons\n\
         \n\
         Step 2: Full-Length Immersive Autobiography\n\
         Based on the structured Table of Contents, write a complete and immersive autobiography:\n\
         - First-Person Perspective: Narrate as if the author is telling their own story.\n\
         - Seamless Flow: Ensure the story progresses naturally across different phases.\n\
         - Expanded Key Moments: Dive deep into emotions, thoughts, and experiences.\n\
         - Sensory & Emotional Detailing: Describe places, people, and events vividly.\n\
         - Authenticity: The storytelling should feel like a genuine human-written memoir.\n\
         - No Artificial Padding: Maintain natural storytelling without unnecessary repetition.\n\
         \n\
         Output Expectations:\n\
         - Emotional Depth: Capture the highs and lows in a gripping, cinematic way.\n\
         - Realistic Feel: Make it feel like an actual autobiography of a real person.\n\
         - Logical Progression: No abrupt stops, unnatural breaks, or repetitive fillers.\n\
         - Balanced Length: Organically maintain the word count through rich storytelling.\n\
         \n\
         First, generate the Table of Contents with concise chapter headings, and then write the complete immersive autobiography based on it.\n"
    ))
}
