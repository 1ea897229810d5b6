//! The closed set of erasable entity categories.
//!
//! Only categories whose teardown has been vetted appear here. Link
//! categories (item-supplier, item-distribution, resource-skill, flow,
//! load, setup-matrix rule) live and die with the entities they connect
//! and are not erasable on their own.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::store::{CategoryStore, DetachedCategory, OperationStore};
use crate::PlanError;

/// An entity category that supports bulk erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Item,
    Location,
    Customer,
    Operation,
    Demand,
    Buffer,
    Skill,
    Resource,
    SetupMatrix,
    Calendar,
    Supplier,
    OperationPlan,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Item,
        Category::Location,
        Category::Customer,
        Category::Operation,
        Category::Demand,
        Category::Buffer,
        Category::Skill,
        Category::Resource,
        Category::SetupMatrix,
        Category::Calendar,
        Category::Supplier,
        Category::OperationPlan,
    ];

    /// Erase order for a full teardown: every category comes after all
    /// categories that reference it.
    pub const TEARDOWN_ORDER: [Category; 12] = [
        Category::OperationPlan,
        Category::Demand,
        Category::Operation,
        Category::Buffer,
        Category::Resource,
        Category::Skill,
        Category::SetupMatrix,
        Category::Supplier,
        Category::Customer,
        Category::Item,
        Category::Location,
        Category::Calendar,
    ];

    /// The name scripts and callers use to address the category.
    pub fn name(self) -> &'static str {
        match self {
            Category::Item => "item",
            Category::Location => "location",
            Category::Customer => "customer",
            Category::Operation => "operation",
            Category::Demand => "demand",
            Category::Buffer => "buffer",
            Category::Skill => "skill",
            Category::Resource => "resource",
            Category::SetupMatrix => "setupmatrix",
            Category::Calendar => "calendar",
            Category::Supplier => "supplier",
            Category::OperationPlan => "operationplan",
        }
    }

    /// Categories whose instances hold references into this one.
    ///
    /// Clearing a category while any of these is non-empty leaves
    /// dangling references behind.
    pub fn dependents(self) -> &'static [Category] {
        use Category::*;
        match self {
            OperationPlan => &[],
            Demand => &[OperationPlan],
            Operation => &[OperationPlan, Demand],
            Buffer => &[Operation],
            Resource => &[Operation],
            Skill => &[Resource, Operation],
            SetupMatrix => &[Resource],
            Supplier => &[Operation],
            Customer => &[Demand],
            Item => &[Buffer, Demand, Operation],
            Location => &[Buffer, Resource, Operation, Demand],
            Calendar => &[Location, Buffer, Resource, Operation],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| PlanError::UnsupportedOperation(s.to_string()))
    }
}

/// One store per erasable category.
///
/// Categories not wired through the builder are [`DetachedCategory`]
/// and always report zero instances.
pub struct CategoryTable {
    item: Arc<dyn CategoryStore>,
    location: Arc<dyn CategoryStore>,
    customer: Arc<dyn CategoryStore>,
    operation: Arc<dyn OperationStore>,
    demand: Arc<dyn CategoryStore>,
    buffer: Arc<dyn CategoryStore>,
    skill: Arc<dyn CategoryStore>,
    resource: Arc<dyn CategoryStore>,
    setupmatrix: Arc<dyn CategoryStore>,
    calendar: Arc<dyn CategoryStore>,
    supplier: Arc<dyn CategoryStore>,
    operationplan: Arc<dyn CategoryStore>,
}

impl CategoryTable {
    pub fn builder() -> CategoryTableBuilder {
        CategoryTableBuilder {
            table: CategoryTable::default(),
        }
    }

    /// The store backing a category.
    pub fn store(&self, category: Category) -> &dyn CategoryStore {
        match category {
            Category::Item => self.item.as_ref(),
            Category::Location => self.location.as_ref(),
            Category::Customer => self.customer.as_ref(),
            Category::Operation => self.operation.as_ref(),
            Category::Demand => self.demand.as_ref(),
            Category::Buffer => self.buffer.as_ref(),
            Category::Skill => self.skill.as_ref(),
            Category::Resource => self.resource.as_ref(),
            Category::SetupMatrix => self.setupmatrix.as_ref(),
            Category::Calendar => self.calendar.as_ref(),
            Category::Supplier => self.supplier.as_ref(),
            Category::OperationPlan => self.operationplan.as_ref(),
        }
    }

    /// The operation category, which drives invalidation.
    pub fn operations(&self) -> &dyn OperationStore {
        self.operation.as_ref()
    }

    /// Instance count per category, in [`Category::ALL`] order.
    pub fn counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.store(c).len()))
            .collect()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let detached: Arc<DetachedCategory> = Arc::new(DetachedCategory);
        Self {
            item: detached.clone(),
            location: detached.clone(),
            customer: detached.clone(),
            operation: detached.clone(),
            demand: detached.clone(),
            buffer: detached.clone(),
            skill: detached.clone(),
            resource: detached.clone(),
            setupmatrix: detached.clone(),
            calendar: detached.clone(),
            supplier: detached.clone(),
            operationplan: detached,
        }
    }
}

impl fmt::Debug for CategoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts()).finish()
    }
}

/// Wires category stores into a [`CategoryTable`].
pub struct CategoryTableBuilder {
    table: CategoryTable,
}

impl CategoryTableBuilder {
    pub fn item(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.item = store;
        self
    }

    pub fn location(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.location = store;
        self
    }

    pub fn customer(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.customer = store;
        self
    }

    pub fn operation(mut self, store: Arc<dyn OperationStore>) -> Self {
        self.table.operation = store;
        self
    }

    pub fn demand(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.demand = store;
        self
    }

    pub fn buffer(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.buffer = store;
        self
    }

    pub fn skill(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.skill = store;
        self
    }

    pub fn resource(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.resource = store;
        self
    }

    pub fn setupmatrix(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.setupmatrix = store;
        self
    }

    pub fn calendar(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.calendar = store;
        self
    }

    pub fn supplier(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.supplier = store;
        self
    }

    pub fn operationplan(mut self, store: Arc<dyn CategoryStore>) -> Self {
        self.table.operationplan = store;
        self
    }

    pub fn build(self) -> CategoryTable {
        self.table
    }
}
