#![allow(clippy::float_cmp)]

use super::*;

fn spin_args(argv: &[&str]) -> SpinArgs {
    let cli = Cli::try_parse_from(std::iter::once("spinwheel").chain(std::iter::once("spin")).chain(argv.iter().copied()))
        .unwrap();
    match cli.command {
        Command::Spin(args) => args,
        Command::Layout(_) => panic!("expected spin arguments"),
    }
}

#[test]
fn spin_settings_use_defaults() {
    let settings = spin_args(&["--offset", "0"]).settings();
    assert_eq!(settings.duration_secs, 10.0);
    assert!(settings.sound_enabled);
    assert!(!settings.remove_winner);
}

#[test]
fn spin_settings_clamp_duration() {
    assert_eq!(spin_args(&["--duration", "90"]).settings().duration_secs, 30.0);
    assert_eq!(spin_args(&["--duration", "0.25"]).settings().duration_secs, 1.0);
    assert_eq!(spin_args(&["--duration", "NaN"]).settings().duration_secs, 10.0);
}

#[test]
fn spin_settings_carry_toggles() {
    let settings = spin_args(&["--sound", "false", "--remove-winner", "Ann", "Ben"]).settings();
    assert!(!settings.sound_enabled);
    assert!(settings.remove_winner);
}

#[test]
fn offset_conflicts_with_seed() {
    assert!(Cli::try_parse_from(["spinwheel", "spin", "--seed", "1", "--offset", "2"]).is_err());
}
