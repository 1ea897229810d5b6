//! Seam between the registry and a dynamically typed scripting layer.
//!
//! The core never implements attribute access for the scripting runtime
//! itself. It describes a type with [`ScriptType`], asks the bridge to
//! ready it, and hands over an [`AttributeAccess`] capability that resolves
//! generic get/set through the category's [`FieldDescriptor`]s.

use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

use crate::{BridgeError, CategoryDescriptor, FieldDescriptor, FieldError};

/// Describes how a category is exposed to scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptType {
    name: String,
    category: String,
    doc: String,
    getattr: bool,
    setattr: bool,
}

impl ScriptType {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            doc: String::new(),
            getattr: false,
            setattr: false,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Enables generic attribute reads.
    pub fn support_getattr(mut self) -> Self {
        self.getattr = true;
        self
    }

    /// Enables generic attribute writes.
    pub fn support_setattr(mut self) -> Self {
        self.setattr = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn documentation(&self) -> &str {
        &self.doc
    }

    pub fn supports_getattr(&self) -> bool {
        self.getattr
    }

    pub fn supports_setattr(&self) -> bool {
        self.setattr
    }
}

/// Generic get/set capability over one live instance.
///
/// Holds the instance weakly: the scripting layer never keeps an entity
/// alive past its owner's teardown.
#[derive(Clone)]
pub struct AttributeAccess {
    script_type: ScriptType,
    fields: Arc<[FieldDescriptor]>,
    instance: Weak<dyn Any + Send + Sync>,
}

impl AttributeAccess {
    pub fn new(
        script_type: &ScriptType,
        descriptor: &CategoryDescriptor,
        instance: Weak<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            script_type: script_type.clone(),
            fields: descriptor.fields().into(),
            instance,
        }
    }

    pub fn type_name(&self) -> &str {
        self.script_type.name()
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    /// True while the underlying instance is alive.
    pub fn is_live(&self) -> bool {
        self.instance.strong_count() > 0
    }

    pub fn get(&self, field: &str) -> Result<Value, FieldError> {
        if !self.script_type.supports_getattr() {
            return Err(self.denied("get"));
        }
        let descriptor = self.field(field)?;
        descriptor.get(self.upgrade()?.as_ref())
    }

    pub fn set(&self, field: &str, value: Value) -> Result<(), FieldError> {
        if !self.script_type.supports_setattr() {
            return Err(self.denied("set"));
        }
        let descriptor = self.field(field)?;
        descriptor.set(self.upgrade()?.as_ref(), value)
    }

    fn field(&self, name: &str) -> Result<&FieldDescriptor, FieldError> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }

    fn upgrade(&self) -> Result<Arc<dyn Any + Send + Sync>, FieldError> {
        self.instance
            .upgrade()
            .ok_or_else(|| FieldError::Released(self.script_type.name().to_string()))
    }

    fn denied(&self, access: &'static str) -> FieldError {
        FieldError::AccessDenied {
            type_name: self.script_type.name().to_string(),
            access,
        }
    }
}

impl std::fmt::Debug for AttributeAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeAccess")
            .field("type", &self.script_type.name())
            .field("fields", &self.field_names())
            .field("live", &self.is_live())
            .finish()
    }
}

/// Registration hooks a scripting runtime exposes to the core.
pub trait ScriptBridge {
    /// Finalizes a script type. An error means the runtime refused the
    /// attribute hooks and startup must abort.
    fn ready_type(
        &mut self,
        script_type: &ScriptType,
        descriptor: &CategoryDescriptor,
    ) -> Result<(), BridgeError>;

    /// Binds a process-wide global name to a capability object.
    fn register_global(&mut self, name: &str, object: AttributeAccess) -> Result<(), BridgeError>;
}

/// In-process bridge that keeps readied types and globals in maps.
///
/// Used when no scripting runtime is embedded, and as the reference
/// behavior for runtime adapters. Readying an identical type again is a
/// no-op, and a global whose instance has been released may be rebound,
/// so the same bridge survives a shutdown and re-initialization.
#[derive(Debug, Default)]
pub struct GlobalBindings {
    types: HashMap<String, ScriptType>,
    globals: HashMap<String, AttributeAccess>,
}

impl GlobalBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_type(&self, name: &str) -> Option<&ScriptType> {
        self.types.get(name)
    }

    pub fn global(&self, name: &str) -> Option<&AttributeAccess> {
        self.globals.get(name)
    }

    pub fn remove_global(&mut self, name: &str) -> Option<AttributeAccess> {
        self.globals.remove(name)
    }

    /// Forgets every readied type and bound global.
    pub fn clear(&mut self) {
        self.types.clear();
        self.globals.clear();
    }
}

impl ScriptBridge for GlobalBindings {
    fn ready_type(
        &mut self,
        script_type: &ScriptType,
        descriptor: &CategoryDescriptor,
    ) -> Result<(), BridgeError> {
        let name = script_type.name();
        if name.is_empty() {
            return Err(BridgeError::TypeRejected {
                name: name.to_string(),
                reason: "empty type name".to_string(),
            });
        }
        if let Some(existing) = self.types.get(name) {
            if existing == script_type {
                debug!(script_type = name, "Script type already ready");
                return Ok(());
            }
            return Err(BridgeError::DuplicateType(name.to_string()));
        }
        if script_type.category() != descriptor.name() {
            return Err(BridgeError::TypeRejected {
                name: name.to_string(),
                reason: format!(
                    "declared for category '{}' but described by '{}'",
                    script_type.category(),
                    descriptor.name()
                ),
            });
        }
        if script_type.supports_getattr() && descriptor.fields().is_empty() {
            return Err(BridgeError::TypeRejected {
                name: name.to_string(),
                reason: "getattr requested on a category without fields".to_string(),
            });
        }
        if script_type.supports_setattr() && !descriptor.fields().iter().any(|f| f.is_writable()) {
            return Err(BridgeError::TypeRejected {
                name: name.to_string(),
                reason: "setattr requested on a category without writable fields".to_string(),
            });
        }

        info!(script_type = name, category = descriptor.name(), "Script type ready");
        self.types.insert(name.to_string(), script_type.clone());
        Ok(())
    }

    fn register_global(&mut self, name: &str, object: AttributeAccess) -> Result<(), BridgeError> {
        if !self.types.contains_key(object.type_name()) {
            return Err(BridgeError::UnknownType(object.type_name().to_string()));
        }
        if self.globals.get(name).is_some_and(AttributeAccess::is_live) {
            return Err(BridgeError::DuplicateGlobal(name.to_string()));
        }
        info!(global = name, script_type = object.type_name(), "Global registered");
        self.globals.insert(name.to_string(), object);
        Ok(())
    }
}
