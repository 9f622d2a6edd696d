#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;

fn parse(args: &[&str]) -> Result<Options, OptionsError> {
    let args: Vec<String> = args.iter().map(|&a| a.to_owned()).collect();
    parse_options(&args)
}

#[test]
fn defaults() {
    let options = parse(&["main.luau"]).unwrap();
    assert_eq!(options.config, ParseConfig::default());
    assert_eq!(options.format, OutputFormat::Human);
    assert!(!options.check);
    assert_eq!(options.paths, vec!["main.luau".to_owned()]);
}

#[test]
fn edition_picks_its_defaults() {
    let options = parse(&["--edition=2026", "a.luau"]).unwrap();
    assert_eq!(options.config, ParseConfig::for_edition(Edition::E2026));
    assert_eq!(
        options.config.long_bracket_mode,
        LongBracketMode::IndexBracketWins
    );
}

#[test]
fn explicit_long_brackets_override_the_edition() {
    let options = parse(&["a.luau", "--long-brackets=long", "--edition=2026"]).unwrap();
    assert_eq!(options.config.edition, Edition::E2026);
    assert_eq!(
        options.config.long_bracket_mode,
        LongBracketMode::LongBracketWins
    );
}

#[test]
fn features_accumulate() {
    let options = parse(&["--feature=if-local,const-bindings", "--feature=integer-suffix"]).unwrap();
    assert_eq!(
        options.config.features,
        FeatureFlags::IF_LOCAL | FeatureFlags::CONST_BINDINGS | FeatureFlags::INTEGER_SUFFIX
    );
    let all = parse(&["--feature=all"]).unwrap();
    assert_eq!(all.config.features, FeatureFlags::all());
}

#[test]
fn declarations_and_output_flags() {
    let options = parse(&["--declarations", "--json", "--check", "--color=never", "-"]).unwrap();
    assert!(options.config.is_declaration_file());
    assert_eq!(options.format, OutputFormat::Json);
    assert_eq!(options.color, ColorMode::Never);
    assert!(options.check);
    assert_eq!(options.paths, vec!["-".to_owned()]);
}

#[test]
fn bad_values_are_reported() {
    assert_eq!(
        parse(&["--edition=1999"]),
        Err(OptionsError::Edition(UnknownEdition("1999".to_owned())))
    );
    assert_eq!(
        parse(&["--edition"]),
        Err(OptionsError::MissingValue("--edition".to_owned()))
    );
    assert_eq!(
        parse(&["--long-brackets=maybe"]),
        Err(OptionsError::UnknownLongBracketMode("maybe".to_owned()))
    );
    assert_eq!(
        parse(&["--verbose"]),
        Err(OptionsError::UnknownFlag("--verbose".to_owned()))
    );
    let unknown = parse(&["--feature=goto"]).unwrap_err();
    assert!(unknown.to_string().contains("if-local"), "{unknown}");
}
