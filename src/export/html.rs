//! HTML transcript encoder.

use crate::engine::TranscriptionResult;

/// Wrap the full transcript in a collapsible `<details>` element.
///
/// The wrapper markup is fixed; the transcript text is inserted untrimmed.
pub fn encode(result: &TranscriptionResult) -> String {
    format!(
        "<h3>Full Transcript</h3>\n\
         <details>\n\
         <summary>Click to expand transcript</summary>\n\
         \n\
         {}\n\
         \n\
         </details>\n\
         \n\
         <p><em>Transcribed with Voxtext using OpenAI Whisper</em></p>",
        result.text
    )
}
