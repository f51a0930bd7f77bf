use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value as Json};

use crate::error::{Error, Result};
use crate::runtime::value::{json_type_name, number_text, parse_number, stringify_scalar};
use crate::runtime::{Argument, Command, Function};
use crate::tools::{self, FunctionTable};

/// Name of the mandatory entry-point function
pub const INIT: &str = "init";

/// Key holding a command's target function
const CMD: &str = "cmd";

/// One top-level value of a script document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Declaration {
    /// List of commands: a composite function
    Function(Vec<Json>),
    /// Numeric variable
    Number(serde_json::Number),
    /// Variable given as text; must still be numeric
    Text(String),
    /// Booleans, null and objects carry no meaning at the top level
    Other(Json),
}

/// A parsed FSL script
///
/// `functions` already contains every built-in, so merging a script into an
/// environment also re-seeds the built-ins.
#[derive(Debug, Clone)]
pub struct Script {
    /// Functions by name, built-ins included
    pub functions: FunctionTable,
    /// Variables by name
    pub variables: HashMap<String, String>,
}

impl Script {
    /// Parse a script document from a reader
    pub fn parse<R: Read>(reader: R) -> Result<Script> {
        let document: BTreeMap<String, Declaration> = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    /// Open, parse and close a script file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Script> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    fn from_document(document: BTreeMap<String, Declaration>) -> Result<Script> {
        let mut functions = tools::builtins();
        let mut variables = HashMap::new();

        for (name, declaration) in document {
            match declaration {
                Declaration::Function(entries) => {
                    let function = parse_function(&name, entries)?;
                    functions.insert(name, Rc::new(function));
                }
                Declaration::Number(number) => {
                    variables.insert(name, number_text(&number));
                }
                Declaration::Text(text) => {
                    if parse_number(&text).is_none() {
                        return Err(Error::NotANumber { name, value: text });
                    }
                    variables.insert(name, text);
                }
                Declaration::Other(value) => {
                    tracing::warn!(
                        name = %name,
                        kind = json_type_name(&value),
                        "ignoring top-level declaration"
                    );
                }
            }
        }

        if !functions.contains_key(INIT) {
            return Err(Error::MissingInit);
        }

        Ok(Script {
            functions,
            variables,
        })
    }
}

impl FromStr for Script {
    type Err = Error;

    fn from_str(source: &str) -> Result<Script> {
        Script::parse(source.as_bytes())
    }
}

fn parse_function(name: &str, entries: Vec<Json>) -> Result<Function> {
    let commands = entries
        .into_iter()
        .map(|entry| match entry {
            Json::Object(fields) => parse_command(name, fields),
            other => Err(Error::InvalidCommand {
                function: name.to_string(),
                reason: format!("invalid command: {other}"),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Function::composite(name, commands))
}

fn parse_command(function: &str, mut fields: Map<String, Json>) -> Result<Command> {
    let target = match fields.remove(CMD) {
        Some(Json::String(target)) => target,
        // A non-string target could never name a function
        Some(other) => {
            return Err(Error::InvalidCommand {
                function: function.to_string(),
                reason: format!("'cmd' attribute must be a string, got {}", json_type_name(&other)),
            })
        }
        None => {
            return Err(Error::InvalidCommand {
                function: function.to_string(),
                reason: "'cmd' attribute is missing".to_string(),
            })
        }
    };

    let arguments = fields
        .into_iter()
        .map(|(key, value)| match stringify_scalar(&value) {
            Some(raw) => Ok(Argument::parse(key, &raw)),
            // null, arrays and objects have no FSL text form
            None => Err(Error::InvalidArgument {
                command: target.clone(),
                argument: key,
                reason: format!("expected a scalar, got {}", json_type_name(&value)),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Command::new(&target, arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::runtime::ArgumentValue;
    use crate::tools::Builtin;

    fn composite(script: &Script, name: &str) -> crate::runtime::Composite {
        match script.functions.get(name).map(|f| (**f).clone()) {
            Some(Function::Composite(c)) => c,
            other => panic!("expected composite {name}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_minimal() {
        let script: Script = r#"{"init": [{"cmd": "create", "id": "x", "value": 5}]}"#
            .parse()
            .unwrap();

        let init = composite(&script, "init");
        assert_eq!(init.commands.len(), 1);
        let command = &init.commands[0];
        assert_eq!(command.target, "create");
        assert_eq!(command.arguments.len(), 2);
        assert!(command.arguments.contains(&Argument::parse("value", "5")));
        assert!(script.variables.is_empty());
    }

    #[test]
    fn test_builtins_are_preseeded() {
        let script: Script = r#"{"init": []}"#.parse().unwrap();
        for builtin in Builtin::ALL {
            assert!(script.functions.contains_key(builtin.name()));
        }
        assert!(script.functions.contains_key(INIT));
    }

    #[test]
    fn test_missing_init() {
        let err = r#"{"main": [], "x": 1}"#.parse::<Script>().unwrap_err();
        assert!(matches!(err, Error::MissingInit));
        assert_eq!(err.kind(), ErrorKind::ScriptStructureError);
    }

    #[test]
    fn test_variables() {
        let script: Script = r#"{"init": [], "a": 5, "b": 2.5, "c": "-3", "d": "1e2"}"#
            .parse()
            .unwrap();
        assert_eq!(script.variables["a"], "5");
        assert_eq!(script.variables["b"], "2.5");
        assert_eq!(script.variables["c"], "-3");
        assert_eq!(script.variables["d"], "1e2");
    }

    #[test]
    fn test_non_numeric_variable_rejected() {
        let err = r#"{"init": [], "x": "abc"}"#.parse::<Script>().unwrap_err();
        assert!(matches!(
            err,
            Error::NotANumber { ref name, ref value } if name == "x" && value == "abc"
        ));
    }

    #[test]
    fn test_other_top_level_values_ignored() {
        let script: Script = r#"{"init": [], "flag": true, "nothing": null, "obj": {"a": 1}}"#
            .parse()
            .unwrap();
        assert!(script.variables.is_empty());
        assert!(!script.functions.contains_key("obj"));
    }

    #[test]
    fn test_command_sigils() {
        let script: Script =
            r##"{"init": [{"cmd": "#print", "value": "$v"}, {"cmd": "print", "value": "#w"}]}"##
                .parse()
                .unwrap();
        let init = composite(&script, "init");
        assert_eq!(init.commands[0].target, "print");
        assert_eq!(
            init.commands[0].arguments[0].value,
            ArgumentValue::Param("v".to_string())
        );
        assert_eq!(
            init.commands[1].arguments[0].value,
            ArgumentValue::Ref("w".to_string())
        );
    }

    #[test]
    fn test_command_without_cmd() {
        let err = r#"{"init": [{"id": "x"}]}"#.parse::<Script>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScriptStructureError);
        assert!(err.to_string().contains("'cmd' attribute is missing"));
    }

    #[test]
    fn test_command_not_an_object() {
        let err = r#"{"init": [42]}"#.parse::<Script>().unwrap_err();
        assert!(matches!(err, Error::InvalidCommand { ref function, .. } if function == "init"));
    }

    #[test]
    fn test_non_scalar_argument() {
        let err = r#"{"init": [{"cmd": "print", "value": [1]}]}"#
            .parse::<Script>()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref argument, .. } if argument == "value"));
    }

    #[test]
    fn test_non_string_cmd_and_null_argument() {
        let err = r#"{"init": [{"cmd": 5}]}"#.parse::<Script>().unwrap_err();
        assert!(err.to_string().contains("'cmd' attribute must be a string, got number"));

        let err = r#"{"init": [{"cmd": "print", "value": null}]}"#
            .parse::<Script>()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScriptStructureError);
    }

    #[test]
    fn test_malformed_json() {
        let err = r#"{"init": [}"#.parse::<Script>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SyntaxError);

        let err = "[1, 2]".parse::<Script>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
    }

    #[test]
    fn test_user_function_overrides_builtin() {
        let script: Script = r#"{"init": [], "print": []}"#.parse().unwrap();
        assert!(!script.functions["print"].is_builtin());
    }
}
