//! Command line options derived from snippet definitions
//!
//! Every declared parameter becomes a `--long-option`; paginated snippets
//! also get `--first`, `--last`, `--before` and `--after`.

use super::snippet::{ParamKind, ParamSpec, SnippetDefinition, help};
use clap::builder::{BoolishValueParser, PossibleValuesParser};
use clap::{Arg, ArgAction, ArgMatches};
use serde_json::{Map, Value};

/// Options added to every paginated snippet
pub static PAGINATION_OPTIONS: [(&str, ParamSpec); 4] = [
    (
        "first",
        help("For use with pagination. Return the first n results.")
            .kind(ParamKind::Int)
            .default_value("20"),
    ),
    (
        "last",
        help("For use with pagination. Return the last n results. Overrides first.")
            .kind(ParamKind::Int)
            .default_value("0"),
    ),
    (
        "before",
        help("For use with pagination. Return the results before a given page cursor.")
            .default_value(""),
    ),
    (
        "after",
        help("For use with pagination. Return the results after a given page cursor.")
            .default_value(""),
    ),
];

/// Descriptor of one synthesized command line option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Parameter name, also the clap argument id
    pub id: &'static str,
    /// Long flag name, underscores replaced with dashes
    pub long: String,
    pub help: &'static str,
    pub required: bool,
    pub multiple: bool,
    pub kind: ParamKind,
    pub default: Option<&'static str>,
    pub choices: &'static [&'static str],
}

impl OptionSpec {
    fn from_param(id: &'static str, spec: &ParamSpec, required: bool) -> Self {
        Self {
            id,
            long: id.replace('_', "-"),
            help: spec.help,
            required,
            multiple: spec.multiple,
            kind: spec.kind,
            default: spec.default,
            choices: spec.choices,
        }
    }

    /// Build the clap argument for this option
    #[must_use]
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.id)
            .long(self.long.clone())
            .help(self.help)
            .required(self.required && self.default.is_none());

        arg = match self.kind {
            ParamKind::String if self.choices.is_empty() => arg,
            ParamKind::String => arg.value_parser(PossibleValuesParser::new(self.choices.iter().copied())),
            ParamKind::Int => arg.value_parser(clap::value_parser!(i64)),
            ParamKind::Bool => arg.value_parser(BoolishValueParser::new()),
        };

        if self.multiple {
            arg = arg.action(ArgAction::Append);
        }
        if let Some(default) = self.default {
            arg = arg.default_value(default);
        }
        arg
    }

    /// Read this option's value from parsed matches
    ///
    /// Absent single values become null and absent lists become empty.
    #[must_use]
    pub fn value_from(&self, matches: &ArgMatches) -> Value {
        if self.multiple {
            let values: Vec<Value> = match self.kind {
                ParamKind::String => matches
                    .get_many::<String>(self.id)
                    .map(|values| values.cloned().map(Value::String).collect())
                    .unwrap_or_default(),
                ParamKind::Int => matches
                    .get_many::<i64>(self.id)
                    .map(|values| values.copied().map(Value::from).collect())
                    .unwrap_or_default(),
                ParamKind::Bool => matches
                    .get_many::<bool>(self.id)
                    .map(|values| values.copied().map(Value::Bool).collect())
                    .unwrap_or_default(),
            };
            return Value::Array(values);
        }

        match self.kind {
            ParamKind::String => matches
                .get_one::<String>(self.id)
                .map_or(Value::Null, |v| Value::String(v.clone())),
            ParamKind::Int => matches
                .get_one::<i64>(self.id)
                .map_or(Value::Null, |v| Value::from(*v)),
            ParamKind::Bool => matches
                .get_one::<bool>(self.id)
                .map_or(Value::Null, |v| Value::Bool(*v)),
        }
    }
}

/// Synthesize the options for a snippet: required, then optional, then pagination
#[must_use]
pub fn synthesize(definition: &SnippetDefinition) -> Vec<OptionSpec> {
    let required = definition
        .required
        .iter()
        .map(|(id, spec)| OptionSpec::from_param(*id, spec, true));
    let optional = definition
        .optional
        .iter()
        .map(|(id, spec)| OptionSpec::from_param(*id, spec, false));
    let pagination = definition
        .pagination
        .then_some(PAGINATION_OPTIONS.iter())
        .into_iter()
        .flatten()
        .map(|(id, spec)| OptionSpec::from_param(*id, spec, false));

    required.chain(optional).chain(pagination).collect()
}

/// Clap arguments for a snippet
#[must_use]
pub fn args_for(definition: &SnippetDefinition) -> Vec<Arg> {
    synthesize(definition).iter().map(OptionSpec::to_arg).collect()
}

/// Collect the variables for a snippet from parsed matches, in option order
#[must_use]
pub fn collect_variables(definition: &SnippetDefinition, matches: &ArgMatches) -> Map<String, Value> {
    synthesize(definition)
        .iter()
        .map(|option| (option.id.to_owned(), option.value_from(matches)))
        .collect()
}
