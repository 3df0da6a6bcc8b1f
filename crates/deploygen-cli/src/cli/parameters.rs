//! Deployment parameter flags, generated from the core flag schema.
//!
//! Every [`FlagSpec`] becomes one `--kebab-case` option with the legacy
//! `--snake_case` spelling kept as a hidden alias. Values are captured as
//! raw strings; typing and defaults belong to the validator.

use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

use deploygen_core::domain::{FLAG_SCHEMA, FlagSpec, RawParameters};

/// Parameters given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ParameterArgs {
    values: RawParameters,
}

impl ParameterArgs {
    /// Only the flags the operator actually passed.
    pub fn into_raw(self) -> RawParameters {
        self.values
    }
}

fn flag_arg(spec: &'static FlagSpec) -> Arg {
    let help = if spec.required {
        format!("{} [required]", spec.help)
    } else {
        spec.help.to_string()
    };
    let arg = Arg::new(spec.name)
        .long(spec.long_flag())
        .value_name("VALUE")
        .action(ArgAction::Set)
        .help(help);
    if spec.name.contains('_') {
        arg.alias(spec.name)
    } else {
        arg
    }
}

impl FromArgMatches for ParameterArgs {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut values = RawParameters::new();
        for spec in FLAG_SCHEMA {
            if let Some(value) = matches.get_one::<String>(spec.name) {
                values.set(spec.name, value.clone());
            }
        }
        Ok(Self { values })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        self.values.merge(Self::from_arg_matches(matches)?.values);
        Ok(())
    }
}

impl Args for ParameterArgs {
    fn augment_args(cmd: Command) -> Command {
        FLAG_SCHEMA
            .iter()
            .fold(cmd.next_help_heading("Deployment parameters"), |cmd, spec| {
                cmd.arg(flag_arg(spec))
            })
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> RawParameters {
        let cmd = ParameterArgs::augment_args(Command::new("generate"));
        let matches = cmd.try_get_matches_from(args).unwrap();
        ParameterArgs::from_arg_matches(&matches).unwrap().into_raw()
    }

    #[test]
    fn kebab_and_legacy_spellings_are_accepted() {
        let raw = parse(&[
            "generate",
            "--redis-ip",
            "10.0.0.2",
            "--mongo_ip",
            "10.0.0.3",
        ]);
        assert_eq!(raw.get("redis_ip"), Some("10.0.0.2"));
        assert_eq!(raw.get("mongo_ip"), Some("10.0.0.3"));
    }

    #[test]
    fn absent_flags_stay_absent() {
        let raw = parse(&["generate", "--discovery", "127.0.0.1:2181"]);
        assert_eq!(raw.keys().collect::<Vec<_>>(), ["discovery"]);
    }

    #[test]
    fn empty_values_are_kept() {
        let raw = parse(&["generate", "--es-pass", ""]);
        assert_eq!(raw.get("es_pass"), Some(""));
    }

    #[test]
    fn every_schema_flag_is_exposed() {
        let cmd = ParameterArgs::augment_args(Command::new("generate"));
        for spec in FLAG_SCHEMA {
            let arg = cmd
                .get_arguments()
                .find(|a| a.get_id() == spec.name)
                .unwrap();
            assert_eq!(arg.get_long(), Some(spec.long_flag().as_str()));
        }
    }
}
