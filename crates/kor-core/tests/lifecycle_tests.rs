//! End-to-end lifecycle tests: activate → generate → deactivate through the
//! registry driver, against the full builtin vocabulary.

use kor_core::{OverrideError, OverrideRegistry, OverrideSession};
use kor_host::{CheckpointStore, GenerationRequest, Value, VaeSelection, VaeStore};
use kor_test_utils::{invoke, invoke_all, HostFixture, ADDNET_RANGE};
use pretty_assertions::assert_eq;

#[test]
fn sequential_checkpoint_scenario() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();
    assert_eq!(fixture.checkpoints.current(), "modelA");

    let seen_during_generation = registry
        .run_request(&mut fixture.cx(), &invoke("checkpoint", &["modelB"]), |cx| {
            cx.checkpoints.current()
        })
        .unwrap();

    assert_eq!(seen_during_generation, "modelB");
    assert_eq!(fixture.checkpoints.current(), "modelA");
}

#[test]
fn failed_generation_still_restores() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();

    let result: Result<(), String> = registry
        .run_request(
            &mut fixture.cx(),
            &invoke_all(&[("clip_skip", &["4"]), ("vae", &["anime"])]),
            |_cx| Err("backend exploded".to_string()),
        )
        .unwrap();

    assert_eq!(result, Err("backend exploded".to_string()));
    assert_eq!(
        fixture.options.get("clip_stop_at_last_layers"),
        Some(&Value::Int(1))
    );
    assert_eq!(fixture.vaes.current(), VaeSelection::Automatic);
}

#[test]
fn activation_failure_restores_already_activated() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();

    // clip_skip activates first, then the checkpoint fails to resolve.
    let err = registry
        .run_request(
            &mut fixture.cx(),
            &invoke_all(&[("clip_skip", &["4"]), ("checkpoint", &["missing"])]),
            |_cx| (),
        )
        .unwrap_err();

    assert!(matches!(err, OverrideError::UnknownResource { .. }));
    assert_eq!(
        fixture.options.get("clip_stop_at_last_layers"),
        Some(&Value::Int(1))
    );
    assert_eq!(fixture.checkpoints.current(), "modelA");
}

#[test]
fn unregistered_keywords_are_ignored() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();

    registry
        .run_request(
            &mut fixture.cx(),
            &invoke_all(&[("somebody_elses_keyword", &["1"]), ("steps", &["42"])]),
            |_cx| (),
        )
        .unwrap();

    assert_eq!(fixture.request.steps, 42);
}

#[test]
fn first_invocation_per_name_wins() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();

    registry
        .run_request(
            &mut fixture.cx(),
            &invoke_all(&[("steps", &["30"]), ("steps", &["99"])]),
            |_cx| (),
        )
        .unwrap();

    assert_eq!(fixture.request.steps, 30);
}

#[test]
fn addnet_patch_through_registry() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image().with_addnet(&["charTurner_v2"]);

    registry
        .run_request(
            &mut fixture.cx(),
            &invoke_all(&[("addnet_model_1", &["turner"]), ("addnet_weight_2", &["0.5"])]),
            |_cx| (),
        )
        .unwrap();

    // Step owns [10, 30): enabled at 10, model_1 at 13, unet_weight_2 at 18.
    assert_eq!(
        fixture.request.script_args[ADDNET_RANGE.start],
        Value::Bool(true)
    );
    assert_eq!(
        fixture.request.script_args[13],
        Value::Text("charTurner_v2".to_string())
    );
    assert_eq!(fixture.request.script_args[18], Value::Float(0.5));
}

#[test]
fn addnet_without_extension_fails() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();

    let err = registry
        .run_request(&mut fixture.cx(), &invoke("addnet_weight_1", &["0.5"]), |_cx| ())
        .unwrap_err();
    assert!(matches!(err, OverrideError::MissingDependency { .. }));
}

#[test]
fn image_conditioned_keyword_is_noop_on_text_request() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();
    let before = fixture.request.image_cfg_scale;

    registry
        .run_request(&mut fixture.cx(), &invoke("image_cfg_scale", &["2.5"]), |_cx| ())
        .unwrap();
    assert_eq!(fixture.request.image_cfg_scale, before);
}

#[test]
fn sessions_are_per_request() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();

    registry
        .run_request(&mut fixture.cx(), &invoke("checkpoint", &["modelB"]), |_cx| ())
        .unwrap();
    assert_eq!(fixture.checkpoints.current(), "modelA");

    // Fresh request, fresh session: the second override captures the real
    // original, not a leftover from request one.
    fixture.next_request(GenerationRequest::text_to_image("another"));
    registry
        .run_request(&mut fixture.cx(), &invoke("checkpoint", &["other"]), |_cx| ())
        .unwrap();
    assert_eq!(fixture.checkpoints.current(), "modelA");
}

#[test]
fn tracing_enabled_run() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("kor_core=debug")
        .with_test_writer()
        .try_init();

    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();
    fixture.settings = fixture.settings.with_tracing();

    registry
        .run_request(&mut fixture.cx(), &invoke("clip_skip", &["4"]), |_cx| ())
        .unwrap();
    assert_eq!(
        fixture.options.get("clip_stop_at_last_layers"),
        Some(&Value::Int(1))
    );
}

#[test]
fn schema_exports_as_json() {
    let registry = OverrideRegistry::builtin();
    let json = serde_json::to_value(registry.schema()).unwrap();

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), registry.len());

    let checkpoint = entries
        .iter()
        .find(|entry| entry["name"] == "checkpoint")
        .unwrap();
    assert_eq!(checkpoint["target"], "model_checkpoint");
    assert_eq!(checkpoint["restores"], true);
}

#[test]
fn deactivate_all_without_activation_is_safe() {
    let registry = OverrideRegistry::builtin();
    let mut fixture = HostFixture::text_to_image();
    fixture.session = OverrideSession::new();

    registry.deactivate_all(&mut fixture.cx()).unwrap();
    assert_eq!(fixture.checkpoints.reload_count, 0);
}
