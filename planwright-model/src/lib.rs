//! Type registry for Planwright.
//!
//! Maps runtime category names to the statically typed entity model:
//! - [`TypeRegistry`]: the catalog of categories and their classes
//! - [`CategoryDescriptor`] / [`ClassDescriptor`]: what a category looks like
//! - [`FieldDescriptor`]: a named field with type-erased get/set accessors
//! - [`Reflect`]: implemented by types that declare their fields
//! - [`ScriptBridge`]: registration hooks of an embedded scripting layer,
//!   with [`GlobalBindings`] as the in-process implementation
//!
//! The registry stays fully statically typed; the scripting side only ever
//! sees JSON values through [`AttributeAccess`].

mod bridge;
mod error;
mod field;
mod registry;

pub use bridge::{AttributeAccess, GlobalBindings, ScriptBridge, ScriptType};
pub use error::{BridgeError, FieldError, RegistryError, RegistryResult};
pub use field::{expect_text, FieldDescriptor, FieldType};
pub use registry::{
    CategoryDescriptor, CategoryHandle, ClassDescriptor, ClassHandle, Reflect, TypeRegistry,
};
