//! Request line sources: a single argument, a batch file, piped stdin, or a prompt.

mod reader;
mod source;

pub use reader::BatchFileReader;
pub use source::{
    ConsoleInput, InputSource, InteractivePrompt, LineQueue, ReaderLines, SingleLine,
};
