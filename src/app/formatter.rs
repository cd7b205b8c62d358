use crate::app::models::MatchResult;
use crate::app::scanner::WalkError;

pub const HIGHLIGHT_START: &str = "\x1b[31m";
pub const HIGHLIGHT_END: &str = "\x1b[0m";

pub struct OutputGenerator;

impl OutputGenerator {
    /// One output line for a match, with the matched bytes wrapped in color
    /// codes when the result carries a highlight range.
    pub fn render_match(result: &MatchResult) -> String {
        let Some(range) = &result.highlight else {
            return result.path.clone();
        };

        let path = result.path.as_str();
        match (
            path.get(..range.start),
            path.get(range.clone()),
            path.get(range.end..),
        ) {
            (Some(before), Some(hit), Some(after)) => {
                format!("{before}{HIGHLIGHT_START}{hit}{HIGHLIGHT_END}{after}")
            }
            _ => result.path.clone(),
        }
    }

    pub fn render_error(err: &WalkError) -> String {
        err.to_string()
    }
}
