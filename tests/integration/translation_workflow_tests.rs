/*!
 * Integration tests for commands dispatched through the controller
 */

use anyhow::Result;
use yatt::app_controller::{Command, CommandOutput, SpeakTarget};
use yatt::history_service::SavedIcon;
use yatt::language_utils::Language;
use yatt::providers::mock::MockTranslator;
use yatt::translation::TranslatorState;

use crate::common::{self, RecordingSynthesizer, ScriptedRecognizer};

fn translate(text: &str) -> Command {
    Command::Translate(Some(text.to_string()))
}

/// Over-budget input never reaches the translator nor the history
#[tokio::test]
async fn test_translate_withTooLongInput_shouldBlockWithoutSideEffects() -> Result<()> {
    let mock = MockTranslator::working();
    let calls = mock.counter();
    let mut controller = common::create_test_controller(
        mock,
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;

    let output = controller.dispatch(translate(&"ж".repeat(3101))).await;

    assert_eq!(output, CommandOutput::Blocked { length: 3101, max: 3100 });
    assert_eq!(controller.orchestrator().state(), TranslatorState::Blocked);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert!(controller.orchestrator().history().list_history()?.is_empty());

    // Shortening the input lifts the block
    let output = controller.dispatch(translate("ж")).await;
    assert!(matches!(output, CommandOutput::Translation { .. }));
    assert_eq!(controller.orchestrator().state(), TranslatorState::Idle);
    Ok(())
}

/// A failed translation keeps the previous output and writes nothing
#[tokio::test]
async fn test_translate_withFailingProvider_shouldKeepState() -> Result<()> {
    let mut controller = common::create_test_controller(
        MockTranslator::failing(),
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;

    let output = controller.dispatch(translate("привет")).await;

    assert_eq!(output, CommandOutput::Nothing);
    assert_eq!(controller.orchestrator().output(), "");
    assert_eq!(controller.orchestrator().input(), "привет");
    assert!(controller.orchestrator().history().list_history()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_swap_shouldTranslateBackAndRecordBothDirections() -> Result<()> {
    let mut controller = common::create_test_controller(
        MockTranslator::working().with_custom_response(|text, _, target| match target {
            Language::English => "hello".to_string(),
            Language::Russian => "привет".to_string(),
            _ => text.to_string(),
        }),
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;

    controller.dispatch(translate("привет")).await;
    let output = controller.dispatch(Command::Swap).await;

    assert_eq!(
        output,
        CommandOutput::Translation {
            text: "привет".to_string(),
            saved: SavedIcon::Inactive
        }
    );
    let orchestrator = controller.orchestrator();
    assert_eq!(orchestrator.source(), Language::English);
    assert_eq!(orchestrator.target(), Language::Russian);
    assert_eq!(orchestrator.input(), "hello");

    let rows = orchestrator.history().list_history()?;
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].source_language.as_str(), rows[1].source_language.as_str()), ("ru", "en"));
    Ok(())
}

/// Starring, re-translating and listing follow the most recent row
#[tokio::test]
async fn test_saveFlow_shouldShowStarOnRepeatedTranslation() -> Result<()> {
    let mut controller = common::create_test_controller(
        MockTranslator::working(),
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;

    controller.dispatch(translate("hello")).await;
    assert_eq!(
        controller.dispatch(Command::Save).await,
        CommandOutput::SavedState(SavedIcon::Active)
    );

    let output = controller.dispatch(translate("hello")).await;
    assert!(matches!(output, CommandOutput::Translation { saved: SavedIcon::Active, .. }));

    let CommandOutput::Records(history) = controller.dispatch(Command::ShowHistory).await else {
        panic!("history should be listed");
    };
    assert_eq!(history.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

    let CommandOutput::Records(saved) = controller.dispatch(Command::ShowSaved).await else {
        panic!("saved translations should be listed");
    };
    assert_eq!(saved.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);

    controller.dispatch(Command::DeleteSaved).await;
    assert_eq!(controller.dispatch(Command::ShowSaved).await, CommandOutput::Records(Vec::new()));
    Ok(())
}

/// Repeating `translate --star` must not unstar the translation
#[tokio::test]
async fn test_star_afterRepeatedTranslation_shouldStayStarred() -> Result<()> {
    let mut controller = common::create_test_controller(
        MockTranslator::working(),
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;

    for _ in 0..2 {
        controller.dispatch(translate("hello")).await;
        assert_eq!(
            controller.dispatch(Command::Star).await,
            CommandOutput::SavedState(SavedIcon::Active)
        );
    }

    assert_eq!(controller.orchestrator().saved_icon(), SavedIcon::Active);
    let CommandOutput::Records(saved) = controller.dispatch(Command::ShowSaved).await else {
        panic!("saved translations should be listed");
    };
    assert_eq!(saved.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    Ok(())
}

#[tokio::test]
async fn test_selectFromList_shouldRestoreLanguagesAndTranslate() -> Result<()> {
    let mut controller = common::create_test_controller(
        MockTranslator::working(),
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;
    controller.dispatch(Command::SetSource(Language::German)).await;
    controller.dispatch(Command::SetTarget(Language::Japanese)).await;
    controller.dispatch(translate("Guten Morgen")).await;
    controller.dispatch(Command::Clear).await;
    controller.dispatch(Command::SetSource(Language::Russian)).await;

    let output = controller.dispatch(Command::SelectFromList(1)).await;

    assert!(matches!(
        output,
        CommandOutput::Translation { ref text, .. } if text == "[ja] Guten Morgen"
    ));
    assert_eq!(controller.orchestrator().source(), Language::German);
    assert_eq!(controller.orchestrator().input(), "Guten Morgen");
    Ok(())
}

#[tokio::test]
async fn test_openAndSaveFile_shouldMoveTextThroughEditor() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "input.txt", "доброе утро")?;
    let output_path = temp_dir.path().join("out").join("translate.txt");
    let mut controller = common::create_test_controller(
        MockTranslator::working(),
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;

    controller.dispatch(Command::OpenFile(input)).await;
    assert_eq!(controller.orchestrator().input(), "доброе утро");
    assert_eq!(controller.orchestrator().symbol_counter(), "11/3100");

    controller.dispatch(Command::Translate(None)).await;
    controller.dispatch(Command::SaveFile(Some(output_path.clone()))).await;

    assert_eq!(std::fs::read_to_string(&output_path)?, "[en] доброе утро");
    Ok(())
}

#[tokio::test]
async fn test_speak_shouldSendSelectedPaneToSynthesizer() -> Result<()> {
    let synthesizer = RecordingSynthesizer::default();
    let spoken = synthesizer.spoken.clone();
    let mut controller = common::create_test_controller(
        MockTranslator::working(),
        synthesizer,
        ScriptedRecognizer::default(),
    )?;

    // Nothing to say yet
    controller.dispatch(Command::Speak(SpeakTarget::Output)).await;
    controller.dispatch(translate("hello")).await;
    controller.dispatch(Command::Speak(SpeakTarget::Input)).await;
    controller.dispatch(Command::Speak(SpeakTarget::Output)).await;

    assert_eq!(*spoken.lock().unwrap(), vec!["hello".to_string(), "[en] hello".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_voiceInput_shouldUseSourceTagAndReplaceInput() -> Result<()> {
    let recognizer = ScriptedRecognizer::saying("good evening");
    let tags = recognizer.tags.clone();
    let mut controller = common::create_test_controller(
        MockTranslator::working(),
        RecordingSynthesizer::default(),
        recognizer,
    )?;
    controller.dispatch(Command::SetSource(Language::English)).await;

    let output = controller.dispatch(Command::VoiceInput).await;

    assert_eq!(output, CommandOutput::Message("good evening".to_string()));
    assert_eq!(controller.orchestrator().input(), "good evening");
    assert_eq!(*tags.lock().unwrap(), vec!["EN-en".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_voiceInput_withSilence_shouldKeepInput() -> Result<()> {
    let mut controller = common::create_test_controller(
        MockTranslator::working(),
        RecordingSynthesizer::default(),
        ScriptedRecognizer::default(),
    )?;
    controller.orchestrator_mut().set_input("typed");

    let output = controller.dispatch(Command::VoiceInput).await;

    assert_eq!(output, CommandOutput::Nothing);
    assert_eq!(controller.orchestrator().input(), "typed");
    Ok(())
}
