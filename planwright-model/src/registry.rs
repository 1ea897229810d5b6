//! Catalog of entity categories and their concrete classes.
//!
//! Categories register once at startup. After registration completes the
//! descriptors are only read, by the reflection bridge and by anything that
//! addresses entities generically by category name.

use std::any::Any;
use std::collections::HashMap;
use tracing::debug;

use crate::{FieldDescriptor, RegistryError, RegistryResult};

/// Implemented by types that declare their fields to the registry.
pub trait Reflect: Any + Send + Sync {
    fn fields() -> Vec<FieldDescriptor>
    where
        Self: Sized;
}

/// Handle to a registered category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryHandle(usize);

/// Handle to a registered class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassHandle {
    category: usize,
    class: usize,
}

/// A named family of entities with shared fields and lifecycle.
#[derive(Debug)]
pub struct CategoryDescriptor {
    name: String,
    label: String,
    fields: Vec<FieldDescriptor>,
    classes: Vec<ClassDescriptor>,
}

impl CategoryDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable label; may be empty.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declared fields in registration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    pub fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// True if any class of this category holds exactly one instance.
    pub fn is_singleton(&self) -> bool {
        self.classes.iter().any(|c| c.is_singleton)
    }
}

/// A concrete type registered under a category.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    category: String,
    name: String,
    is_singleton: bool,
    script_type: Option<String>,
}

impl ClassDescriptor {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for classes holding exactly one instance rather than a
    /// collection.
    pub fn is_singleton(&self) -> bool {
        self.is_singleton
    }

    /// Name of the scripting type bound to this class, once readied.
    pub fn script_type(&self) -> Option<&str> {
        self.script_type.as_deref()
    }
}

/// Maps category names to their descriptors.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    categories: Vec<CategoryDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new category.
    ///
    /// Fails with [`RegistryError::DuplicateCategory`] if the name is taken;
    /// reinitialization must [`clear`](Self::clear) the registry first.
    pub fn register_category(&mut self, name: &str, label: &str) -> RegistryResult<CategoryHandle> {
        if self.index.contains_key(name) {
            return Err(RegistryError::DuplicateCategory(name.to_string()));
        }
        let slot = self.categories.len();
        self.categories.push(CategoryDescriptor {
            name: name.to_string(),
            label: label.to_string(),
            fields: Vec::new(),
            classes: Vec::new(),
        });
        self.index.insert(name.to_string(), slot);
        debug!(category = name, "Category registered");
        Ok(CategoryHandle(slot))
    }

    /// Attaches a concrete class to an existing category.
    pub fn register_class(
        &mut self,
        category_name: &str,
        class_name: &str,
        is_singleton: bool,
    ) -> RegistryResult<ClassHandle> {
        let slot = *self
            .index
            .get(category_name)
            .ok_or_else(|| RegistryError::UnknownCategory(category_name.to_string()))?;
        let category = &mut self.categories[slot];
        if category.class(class_name).is_some() {
            return Err(RegistryError::DuplicateClass {
                category: category_name.to_string(),
                class: class_name.to_string(),
            });
        }
        category.classes.push(ClassDescriptor {
            category: category_name.to_string(),
            name: class_name.to_string(),
            is_singleton,
            script_type: None,
        });
        debug!(category = category_name, class = class_name, is_singleton, "Class registered");
        Ok(ClassHandle {
            category: slot,
            class: category.classes.len() - 1,
        })
    }

    /// Declares one field on a category.
    pub fn add_field(&mut self, handle: CategoryHandle, field: FieldDescriptor) -> RegistryResult<()> {
        let category = self
            .categories
            .get_mut(handle.0)
            .ok_or_else(|| RegistryError::UnknownCategory(format!("#{}", handle.0)))?;
        if category.field(field.name()).is_some() {
            return Err(RegistryError::DuplicateField {
                category: category.name.clone(),
                field: field.name().to_string(),
            });
        }
        category.fields.push(field);
        Ok(())
    }

    /// Declares every field `T` reports.
    pub fn register_fields<T: Reflect>(&mut self, handle: CategoryHandle) -> RegistryResult<()> {
        T::fields()
            .into_iter()
            .try_for_each(|field| self.add_field(handle, field))
    }

    /// Records the scripting type a class is exposed as.
    pub fn attach_script_type(&mut self, handle: ClassHandle, type_name: &str) -> RegistryResult<()> {
        let class = self
            .categories
            .get_mut(handle.category)
            .and_then(|c| c.classes.get_mut(handle.class))
            .ok_or(RegistryError::UnknownClass)?;
        class.script_type = Some(type_name.to_string());
        Ok(())
    }

    /// Looks up a category by name. Never fails.
    pub fn lookup(&self, name: &str) -> Option<&CategoryDescriptor> {
        self.index.get(name).map(|&slot| &self.categories[slot])
    }

    pub fn category(&self, handle: CategoryHandle) -> Option<&CategoryDescriptor> {
        self.categories.get(handle.0)
    }

    pub fn class(&self, handle: ClassHandle) -> Option<&ClassDescriptor> {
        self.categories
            .get(handle.category)
            .and_then(|c| c.classes.get(handle.class))
    }

    /// Categories in registration order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryDescriptor> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Drops every registration so the engine can be initialized again.
    /// Handles issued before the call are invalidated.
    pub fn clear(&mut self) {
        self.categories.clear();
        self.index.clear();
    }
}
