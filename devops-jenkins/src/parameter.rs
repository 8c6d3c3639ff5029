//! Job parameter definitions

use devops_core::domain::{Parameter, ParameterType};

use crate::element::Element;

pub const PARAMETERS_PROPERTY: &str = "hudson.model.ParametersDefinitionProperty";
const PARAMETER_DEFINITIONS: &str = "parameterDefinitions";

const STRING_DEFINITION: &str = "hudson.model.StringParameterDefinition";
const TEXT_DEFINITION: &str = "hudson.model.TextParameterDefinition";
const BOOLEAN_DEFINITION: &str = "hudson.model.BooleanParameterDefinition";
const PASSWORD_DEFINITION: &str = "hudson.model.PasswordParameterDefinition";
const CHOICE_DEFINITION: &str = "hudson.model.ChoiceParameterDefinition";
const FILE_DEFINITION: &str = "hudson.model.FileParameterDefinition";

/// Element tag of a parameter kind
///
/// Unknown kinds keep their raw tag, as long as it can be written as one.
fn definition_tag(param_type: &ParameterType) -> Option<&str> {
    match param_type {
        ParameterType::String => Some(STRING_DEFINITION),
        ParameterType::Text => Some(TEXT_DEFINITION),
        ParameterType::Boolean => Some(BOOLEAN_DEFINITION),
        ParameterType::Password => Some(PASSWORD_DEFINITION),
        ParameterType::Choice => Some(CHOICE_DEFINITION),
        ParameterType::File => Some(FILE_DEFINITION),
        ParameterType::Unknown(tag) => is_element_name(tag).then_some(tag.as_str()),
    }
}

fn parameter_type(tag: &str) -> ParameterType {
    match tag {
        STRING_DEFINITION => ParameterType::String,
        TEXT_DEFINITION => ParameterType::Text,
        BOOLEAN_DEFINITION => ParameterType::Boolean,
        PASSWORD_DEFINITION => ParameterType::Password,
        CHOICE_DEFINITION => ParameterType::Choice,
        FILE_DEFINITION => ParameterType::File,
        other => ParameterType::Unknown(other.to_string()),
    }
}

fn is_element_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Write `parameters` as a parameters property under `properties`
pub fn encode_parameters(parameters: &[Parameter], properties: &mut Element) {
    let definitions = properties
        .create_child(PARAMETERS_PROPERTY)
        .create_child(PARAMETER_DEFINITIONS);

    for parameter in parameters {
        let Some(tag) = definition_tag(&parameter.param_type) else {
            continue;
        };

        let definition = definitions.create_child(tag);
        definition.create_child("name").set_text(&parameter.name);
        definition
            .create_child("description")
            .set_text(&parameter.description);

        match parameter.param_type {
            ParameterType::Choice => {
                let options = definition
                    .create_child("choices")
                    .set_attr("class", "java.util.Arrays$ArrayList")
                    .create_child("a")
                    .set_attr("class", "string-array");
                for choice in parameter.default_value.split('\n') {
                    options.create_child("string").set_text(choice);
                }
            }
            ParameterType::File => {}
            _ => {
                definition
                    .create_child("defaultValue")
                    .set_text(&parameter.default_value);
            }
        }
    }
}

/// Read the parameters property under `properties`
///
/// Returns `None` when the property is absent or holds no definitions.
pub fn decode_parameters(properties: &Element) -> Option<Vec<Parameter>> {
    let definitions = properties.select_path(&[PARAMETERS_PROPERTY, PARAMETER_DEFINITIONS])?;

    let parameters: Vec<Parameter> = definitions
        .children()
        .iter()
        .map(decode_parameter)
        .collect();

    (!parameters.is_empty()).then_some(parameters)
}

fn decode_parameter(definition: &Element) -> Parameter {
    let param_type = parameter_type(definition.tag());
    let default_value = match param_type {
        ParameterType::Choice => decode_choices(definition),
        ParameterType::File => String::new(),
        _ => definition.child_string("defaultValue"),
    };

    Parameter {
        name: definition.child_string("name"),
        description: definition.child_string("description"),
        param_type,
        default_value,
    }
}

/// Options of a choice parameter, newline joined
///
/// Older configurations list the `string` entries directly under `choices`
/// instead of inside an `a` array.
fn decode_choices(definition: &Element) -> String {
    let Some(choices) = definition.child("choices") else {
        return String::new();
    };
    let list = choices.child("a").unwrap_or(choices);

    list.children_named("string")
        .map(Element::text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
