use std::sync::Arc;

use nidi::prelude::*;

pub struct Listed {
    pub window: Arc<String>,
    pub depth: u32,
}

#[component]
impl Listed {
    #[inject("$window", "depth")]
    pub fn new(window: Arc<String>, depth: u32) -> Self {
        Self { window, depth }
    }
}

pub struct PerArgument {
    pub window: Arc<String>,
}

#[component(Arc<PerArgument>, Arc::new)]
impl PerArgument {
    #[inject]
    pub fn create(#[named("$window")] window: Arc<String>) -> Self {
        Self { window }
    }
}

fn main() {
    assert_eq!(<Listed as Component>::INJECT, &["$window", "depth"]);
    assert_eq!(<PerArgument as Component>::INJECT, &["$window"]);
}
