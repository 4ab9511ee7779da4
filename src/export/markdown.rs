//! Markdown transcript encoder.

use crate::engine::TranscriptionResult;

/// Fixed heading, full text, horizontal rule, attribution line.
pub fn encode(result: &TranscriptionResult) -> String {
    format!(
        "# Transcript\n\
         \n\
         {}\n\
         \n\
         ---\n\
         \n\
         *Transcribed with Voxtext using OpenAI Whisper*\n",
        result.text
    )
}
