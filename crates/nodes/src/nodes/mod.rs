//! One adapter per registered node.

pub mod character_builder;
pub mod grayscale;
pub mod multi_character;
pub mod prompt_builder;
pub mod prompt_generator;
pub mod scene_generator;

use crate::error::NodeError;
use crate::value::NodeInputs;

pub use character_builder::CharacterBuilderNode;
pub use grayscale::GrayscaleNode;
pub use multi_character::{MultiCharacterFieldsNode, MultiCharacterNode};
pub use prompt_builder::PromptBuilderNode;
pub use prompt_generator::PromptGeneratorNode;
pub use scene_generator::SceneGeneratorNode;

/// Owned copy of a string input; absent optional fields read as `""`.
fn text(inputs: &NodeInputs, name: &str) -> Result<String, NodeError> {
    inputs.string_or_empty(name).map(str::to_string)
}
