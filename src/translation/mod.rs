/*!
 * Translation workflow.
 *
 * - `orchestrator`: editor state, symbol budget and the translate/swap cycle
 */

pub use self::orchestrator::{Orchestrator, TranslateOutcome, TranslatorState};

pub mod orchestrator;
