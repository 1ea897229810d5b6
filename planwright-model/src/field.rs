use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::FieldError;

type Getter = Arc<dyn Fn(&dyn Any) -> Result<Value, FieldError> + Send + Sync>;
type Setter = Arc<dyn Fn(&dyn Any, Value) -> Result<(), FieldError> + Send + Sync>;

/// A declared field of a category: a name, a value type and an accessor
/// pair.
///
/// Accessors are written against the concrete type and stored type-erased,
/// so the registry can hold descriptors for every category side by side.
/// Setters take `&T`: instances reachable from the scripting layer are
/// shared and use interior mutability.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    field_type: FieldType,
    getter: Getter,
    setter: Option<Setter>,
}

impl FieldDescriptor {
    /// A field that can be read but not assigned.
    pub fn read_only<T: Any>(
        name: &'static str,
        field_type: FieldType,
        get: fn(&T) -> Value,
    ) -> Self {
        Self {
            name,
            field_type,
            getter: Arc::new(move |instance: &dyn Any| -> Result<Value, FieldError> {
                Ok(get(downcast::<T>(name, instance)?))
            }),
            setter: None,
        }
    }

    /// A field with both accessors.
    pub fn read_write<T: Any>(
        name: &'static str,
        field_type: FieldType,
        get: fn(&T) -> Value,
        set: fn(&T, Value) -> Result<(), FieldError>,
    ) -> Self {
        Self {
            setter: Some(Arc::new(
                move |instance: &dyn Any, value: Value| -> Result<(), FieldError> {
                    set(downcast::<T>(name, instance)?, value)
                },
            )),
            ..Self::read_only(name, field_type, get)
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads this field from an instance of the declaring type.
    pub fn get(&self, instance: &dyn Any) -> Result<Value, FieldError> {
        (self.getter)(instance)
    }

    /// Assigns this field on an instance of the declaring type.
    pub fn set(&self, instance: &dyn Any, value: Value) -> Result<(), FieldError> {
        match &self.setter {
            Some(setter) => setter(instance, value),
            None => Err(FieldError::ReadOnly(self.name.to_string())),
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("writable", &self.is_writable())
            .finish()
    }
}

fn downcast<'a, T: Any>(field: &str, instance: &'a dyn Any) -> Result<&'a T, FieldError> {
    instance
        .downcast_ref::<T>()
        .ok_or_else(|| FieldError::InstanceMismatch(field.to_string()))
}

/// Extracts a string from a value assigned to a text or datetime field.
pub fn expect_text<'a>(
    field: &str,
    value: &'a Value,
    expected: FieldType,
) -> Result<&'a str, FieldError> {
    value.as_str().ok_or_else(|| FieldError::TypeMismatch {
        field: field.to_string(),
        expected,
    })
}

/// The value type of a declared field, as seen by the scripting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Bool,
    DateTime,
    Duration,
    /// Reference to another entity, addressed by name.
    Relation,
}
