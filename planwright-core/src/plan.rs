//! The process-wide plan context.
//!
//! Holds the reference time and top-level settings, triggers invalidation
//! when the time moves, and is the entry point for erasing categories.
//!
//! # Lifecycle
//!
//! [`PlanContext::initialize`] runs once from the embedder's startup path,
//! before any concurrent access. No lock serializes competing callers of
//! the setters: callers serialize their own writes. After
//! [`PlanContext::shutdown`] the global accessor reports
//! [`PlanError::UninitializedSingleton`].

use planwright_model::{
    expect_text, AttributeAccess, FieldDescriptor, FieldError, FieldType, Reflect, RegistryError,
    ScriptBridge, ScriptType, TypeRegistry,
};
use planwright_types::PlanDate;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use crate::invalidation::{FullSweep, InvalidationStrategy, TimeChange};
use crate::{Category, CategoryTable, LogFile, PlanConfig, PlanError, PlanResult};

/// Category name of the plan in the type registry.
pub const PLAN_CATEGORY: &str = "plan";
/// Name of the scripting type exposing the plan.
pub const SCRIPT_TYPE: &str = "parameters";
/// Global name the plan is published under.
pub const SETTINGS_GLOBAL: &str = "settings";

static THE_PLAN: RwLock<Option<Arc<PlanContext>>> = RwLock::new(None);

#[derive(Debug)]
struct Settings {
    name: String,
    description: String,
    current: PlanDate,
}

/// Global planning configuration and the current reference time.
pub struct PlanContext {
    settings: RwLock<Settings>,
    log_file: LogFile,
    categories: CategoryTable,
    invalidation: Box<dyn InvalidationStrategy>,
}

/// Assembles a [`PlanContext`].
pub struct PlanBuilder {
    categories: CategoryTable,
    config: PlanConfig,
    log_file: LogFile,
    invalidation: Box<dyn InvalidationStrategy>,
}

impl PlanBuilder {
    pub fn categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    pub fn config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Log destination to manage, typically the one the tracing
    /// subscriber writes to.
    pub fn log_file(mut self, log_file: LogFile) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn invalidation(mut self, strategy: impl InvalidationStrategy + 'static) -> Self {
        self.invalidation = Box::new(strategy);
        self
    }

    /// Builds a detached context. It is not published as the global plan.
    pub fn build(self) -> PlanResult<PlanContext> {
        if let Some(path) = &self.config.logfile {
            self.log_file.open(path)?;
        }
        Ok(PlanContext {
            settings: RwLock::new(Settings {
                name: self.config.name,
                description: self.config.description,
                current: self.config.current.unwrap_or_else(PlanDate::now),
            }),
            log_file: self.log_file,
            categories: self.categories,
            invalidation: self.invalidation,
        })
    }
}

impl PlanContext {
    pub fn builder() -> PlanBuilder {
        PlanBuilder {
            categories: CategoryTable::default(),
            config: PlanConfig::default(),
            log_file: LogFile::default(),
            invalidation: Box::new(FullSweep),
        }
    }

    // ================================================================
    // Singleton lifecycle
    // ================================================================

    /// Builds the context, registers the plan type and publishes it.
    ///
    /// Registers category and class `plan`, its fields, the `parameters`
    /// script type, and binds the instance to the `settings` global.
    /// Fails with [`PlanError::AlreadyInitialized`] while a plan is live;
    /// the live plan is left untouched. The builder runs before anything is
    /// registered, so a configuration error leaves registry and bridge
    /// unchanged. Bridge hooks must not call back into the singleton
    /// accessors.
    pub fn initialize(
        registry: &mut TypeRegistry,
        bridge: &mut dyn ScriptBridge,
        builder: PlanBuilder,
    ) -> PlanResult<Arc<PlanContext>> {
        let mut slot = THE_PLAN.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(PlanError::AlreadyInitialized);
        }

        let plan = Arc::new(builder.build()?);
        if let Err(e) = Self::publish(registry, bridge, &plan) {
            if let Err(close) = plan.log_file.close() {
                warn!(error = %close, "Failed to close log file after aborted startup");
            }
            return Err(e);
        }

        *slot = Some(Arc::clone(&plan));
        info!(current = %plan.current_time(), "Plan context initialized");
        Ok(plan)
    }

    fn publish(
        registry: &mut TypeRegistry,
        bridge: &mut dyn ScriptBridge,
        plan: &Arc<PlanContext>,
    ) -> PlanResult<()> {
        let category = registry.register_category(PLAN_CATEGORY, "")?;
        let class = registry.register_class(PLAN_CATEGORY, PLAN_CATEGORY, true)?;
        registry.register_fields::<PlanContext>(category)?;

        let script_type = ScriptType::new(SCRIPT_TYPE, PLAN_CATEGORY)
            .doc("global planning settings")
            .support_getattr()
            .support_setattr();
        let descriptor = registry
            .category(category)
            .ok_or_else(|| RegistryError::UnknownCategory(PLAN_CATEGORY.to_string()))?;
        bridge.ready_type(&script_type, descriptor)?;

        let erased: Arc<dyn Any + Send + Sync> = plan.clone();
        bridge.register_global(
            SETTINGS_GLOBAL,
            AttributeAccess::new(&script_type, descriptor, Arc::downgrade(&erased)),
        )?;
        registry.attach_script_type(class, SCRIPT_TYPE)?;
        Ok(())
    }

    /// The live plan, or [`PlanError::UninitializedSingleton`].
    pub fn try_instance() -> PlanResult<Arc<PlanContext>> {
        THE_PLAN
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(PlanError::UninitializedSingleton)
    }

    /// The live plan.
    ///
    /// # Panics
    ///
    /// Panics before [`initialize`](Self::initialize) or after
    /// [`shutdown`](Self::shutdown): that is a lifecycle-contract violation
    /// by the embedder.
    pub fn instance() -> Arc<PlanContext> {
        match Self::try_instance() {
            Ok(plan) => plan,
            Err(e) => panic!("{e}: plan accessed outside initialize/shutdown"),
        }
    }

    pub fn is_initialized() -> bool {
        THE_PLAN
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Closes the log file, then clears the global accessor.
    ///
    /// Handles obtained earlier stay valid but are no longer the plan;
    /// the `settings` global stops resolving once they are dropped.
    pub fn shutdown() -> PlanResult<()> {
        let mut slot = THE_PLAN.write().unwrap_or_else(PoisonError::into_inner);
        let plan = slot.as_ref().ok_or(PlanError::UninitializedSingleton)?;
        info!("Plan context shutting down");
        let closed = plan.log_file.close();
        *slot = None;
        closed.map_err(PlanError::from)
    }

    // ================================================================
    // Settings
    // ================================================================

    pub fn name(&self) -> String {
        self.read_settings().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.write_settings().name = name.into();
    }

    pub fn description(&self) -> String {
        self.read_settings().description.clone()
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.write_settings().description = description.into();
    }

    pub fn current_time(&self) -> PlanDate {
        self.read_settings().current
    }

    /// Moves the reference time and marks every affected operation
    /// changed before returning. Runs even when the time is unchanged.
    pub fn set_current_time(&self, current: PlanDate) {
        let previous = {
            let mut settings = self.write_settings();
            std::mem::replace(&mut settings.current, current)
        };
        // Settings are unlocked here: mark-changed hooks may read the time.
        self.invalidation
            .invalidate(self.categories.operations(), TimeChange { previous, current });
    }

    pub fn log_file(&self) -> &LogFile {
        &self.log_file
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    // ================================================================
    // Erase
    // ================================================================

    /// Clears every instance of the named category.
    ///
    /// Names outside the category table fail with
    /// [`PlanError::UnsupportedOperation`] and nothing is modified. No
    /// dependency check is made: the caller erases dependents first.
    pub fn erase(&self, name: &str) -> PlanResult<()> {
        let category = Self::parse_category(name)?;
        self.erase_category(category);
        Ok(())
    }

    /// Like [`erase`](Self::erase), but refuses while any category that
    /// references the target still holds instances.
    pub fn erase_checked(&self, name: &str) -> PlanResult<()> {
        let category = Self::parse_category(name)?;
        for &dependent in category.dependents() {
            let count = self.categories.store(dependent).len();
            if count > 0 {
                warn!(%category, %dependent, count, "Erase refused, dependents present");
                return Err(PlanError::DependentsPresent {
                    category,
                    dependent,
                    count,
                });
            }
        }
        self.erase_category(category);
        Ok(())
    }

    /// Clears one category and returns how many instances it held.
    pub fn erase_category(&self, category: Category) -> usize {
        let store = self.categories.store(category);
        let removed = store.len();
        store.clear();
        info!(%category, removed, "Category erased");
        removed
    }

    /// Clears every category in [`Category::TEARDOWN_ORDER`].
    pub fn erase_all(&self) -> usize {
        Category::TEARDOWN_ORDER
            .into_iter()
            .map(|category| self.erase_category(category))
            .sum()
    }

    fn parse_category(name: &str) -> PlanResult<Category> {
        name.parse::<Category>().inspect_err(|_| {
            warn!(category = name, "Erase operation not supported");
        })
    }

    fn read_settings(&self) -> RwLockReadGuard<'_, Settings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_settings(&self) -> RwLockWriteGuard<'_, Settings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PlanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.read_settings();
        f.debug_struct("PlanContext")
            .field("name", &settings.name)
            .field("current", &settings.current.to_string())
            .field("logfile", &self.log_file.path())
            .field("categories", &self.categories)
            .finish()
    }
}

impl Reflect for PlanContext {
    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::read_write::<PlanContext>(
                "name",
                FieldType::Text,
                |plan| Value::from(plan.name()),
                |plan, value| {
                    plan.set_name(expect_text("name", &value, FieldType::Text)?);
                    Ok(())
                },
            ),
            FieldDescriptor::read_write::<PlanContext>(
                "description",
                FieldType::Text,
                |plan| Value::from(plan.description()),
                |plan, value| {
                    plan.set_description(expect_text("description", &value, FieldType::Text)?);
                    Ok(())
                },
            ),
            FieldDescriptor::read_write::<PlanContext>(
                "current",
                FieldType::DateTime,
                |plan| Value::from(plan.current_time().to_string()),
                |plan, value| {
                    let text = expect_text("current", &value, FieldType::DateTime)?;
                    let current = text.parse::<PlanDate>().map_err(|e| FieldError::InvalidValue {
                        field: "current".to_string(),
                        message: e.to_string(),
                    })?;
                    plan.set_current_time(current);
                    Ok(())
                },
            ),
            FieldDescriptor::read_write::<PlanContext>(
                "logfile",
                FieldType::Text,
                |plan| {
                    let path = plan.log_file.path().unwrap_or_default();
                    Value::from(path.to_string_lossy().into_owned())
                },
                |plan, value| {
                    let target = expect_text("logfile", &value, FieldType::Text)?;
                    plan.log_file
                        .redirect(target)
                        .map_err(|e| FieldError::InvalidValue {
                            field: "logfile".to_string(),
                            message: e.to_string(),
                        })
                },
            ),
        ]
    }
}
