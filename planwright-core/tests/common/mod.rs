//! Shared test fixtures: an in-memory planning network.

#![allow(dead_code)]

use planwright_core::{Category, CategoryTable, ChangeTracked, EntityStore};
use planwright_types::PlanDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Operation stand-in that counts change notifications.
#[derive(Debug, Default)]
pub struct Operation {
    pub name: String,
    marks: AtomicUsize,
}

impl Operation {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            marks: AtomicUsize::new(0),
        }
    }

    pub fn marks(&self) -> usize {
        self.marks.load(Ordering::SeqCst)
    }

    pub fn is_changed(&self) -> bool {
        self.marks() > 0
    }
}

impl ChangeTracked for Operation {
    fn mark_changed(&self) {
        self.marks.fetch_add(1, Ordering::SeqCst);
    }
}

/// Any other entity: only counted and cleared.
#[derive(Debug)]
pub struct Entity(pub String);

/// One in-memory store per category, shared with the table under test.
#[derive(Debug, Default)]
pub struct Network {
    pub operations: Arc<EntityStore<Operation>>,
    pub item: Arc<EntityStore<Entity>>,
    pub location: Arc<EntityStore<Entity>>,
    pub customer: Arc<EntityStore<Entity>>,
    pub demand: Arc<EntityStore<Entity>>,
    pub buffer: Arc<EntityStore<Entity>>,
    pub skill: Arc<EntityStore<Entity>>,
    pub resource: Arc<EntityStore<Entity>>,
    pub setupmatrix: Arc<EntityStore<Entity>>,
    pub calendar: Arc<EntityStore<Entity>>,
    pub supplier: Arc<EntityStore<Entity>>,
    pub operationplan: Arc<EntityStore<Entity>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> CategoryTable {
        CategoryTable::builder()
            .operation(self.operations.clone())
            .item(self.item.clone())
            .location(self.location.clone())
            .customer(self.customer.clone())
            .demand(self.demand.clone())
            .buffer(self.buffer.clone())
            .skill(self.skill.clone())
            .resource(self.resource.clone())
            .setupmatrix(self.setupmatrix.clone())
            .calendar(self.calendar.clone())
            .supplier(self.supplier.clone())
            .operationplan(self.operationplan.clone())
            .build()
    }

    /// Adds `count` instances to a non-operation category.
    pub fn populate(&self, category: Category, count: usize) {
        let store = match category {
            Category::Operation => {
                for i in 0..count {
                    self.operations.insert(Operation::named(&format!("op-{i}")));
                }
                return;
            }
            Category::Item => &self.item,
            Category::Location => &self.location,
            Category::Customer => &self.customer,
            Category::Demand => &self.demand,
            Category::Buffer => &self.buffer,
            Category::Skill => &self.skill,
            Category::Resource => &self.resource,
            Category::SetupMatrix => &self.setupmatrix,
            Category::Calendar => &self.calendar,
            Category::Supplier => &self.supplier,
            Category::OperationPlan => &self.operationplan,
        };
        for i in 0..count {
            store.insert(Entity(format!("{category}-{i}")));
        }
    }
}

pub fn date(year: i32, month: u32, day: u32) -> PlanDate {
    PlanDate::from_ymd(year, month, day).unwrap()
}
