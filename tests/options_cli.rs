//! Integration tests for option parsing and the command-line interface.

use std::path::PathBuf;

use clap::Parser;
use meshview::cli::Cli;
use meshview::input::KeyCommandTag;
use meshview::{Options, ViewAxis, ViewerCommand};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("meshview").chain(args.iter().copied()))
        .expect("valid arguments")
}

#[test]
fn model_is_the_only_required_argument() {
    let cli = parse(&["teapot.obj"]);
    assert_eq!(cli.model, PathBuf::from("teapot.obj"));
    assert!(cli.env.is_none());
    assert!(cli.frames.is_none());
    assert_eq!(cli.title, "meshview");
    assert_eq!(cli.resolve_options().unwrap(), Options::default());

    assert!(Cli::try_parse_from(["meshview"]).is_err());
}

#[test]
fn flags_override_defaults() {
    let cli = parse(&[
        "scene.glb", "--env", "sky.hdr", "--axis", "X", "--back", "--fov", "40", "--frames",
        "3", "--title", "check",
    ]);
    assert_eq!(cli.env, Some(PathBuf::from("sky.hdr")));
    assert_eq!(cli.frames, Some(3));
    assert_eq!(cli.title, "check");

    let options = cli.resolve_options().unwrap();
    assert_eq!(options.camera.view_axis, ViewAxis::X);
    assert!(!options.camera.front);
    assert_eq!(options.camera.fovy, 40.0);
}

#[test]
fn unknown_axis_is_rejected() {
    assert!(Cli::try_parse_from(["meshview", "m.obj", "--axis", "w"]).is_err());
}

#[test]
fn options_file_then_flags() {
    let dir = std::env::temp_dir().join(format!("meshview-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("view.toml");

    let mut saved = Options::default();
    saved.camera.fovy = 30.0;
    saved.camera.view_axis = ViewAxis::Y;
    saved.display.background = "#202020".into();
    saved
        .keybindings
        .bind("KeyR", KeyCommandTag::FrameModel);
    saved.save(&path).unwrap();

    let path_arg = path.to_string_lossy().into_owned();
    let cli = parse(&["m.obj", "--options", &path_arg, "--fov", "90"]);
    let options = cli.resolve_options().unwrap();
    assert_eq!(options.camera.fovy, 90.0);
    assert_eq!(options.camera.view_axis, ViewAxis::Y);
    assert_eq!(options.display.background, "#202020");
    assert_eq!(options.keybindings.lookup("KeyR"), Some(ViewerCommand::FrameModel));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_options_file_is_an_error() {
    let cli = parse(&["m.obj", "--options", "/nonexistent/meshview/options.toml"]);
    assert!(cli.resolve_options().is_err());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let options = Options::from_toml(
        r#"
        [camera]
        view_axis = "x"
        front = false

        [display]
        target_fps = 30
        "#,
    )
    .unwrap();
    assert_eq!(options.camera.view_axis, ViewAxis::X);
    assert!(!options.camera.front);
    assert_eq!(options.camera.fovy, Options::default().camera.fovy);
    assert_eq!(options.display.target_fps, 30);
    assert_eq!(options.lighting, Options::default().lighting);
}
