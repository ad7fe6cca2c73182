use std::sync::Arc;

use nidi::prelude::*;

pub struct Gauge {
    pub unit: Arc<String>,
    pub scale: u32,
}

#[component]
impl Gauge {
    #[inline]
    pub fn unitless(scale: u32) -> Self {
        Self::new(Arc::new(String::new()), scale)
    }

    #[must_use]
    #[inject("unit", "scale")]
    pub fn new(unit: Arc<String>, scale: u32) -> Self {
        Self { unit, scale }
    }

    #[allow(dead_code)]
    fn describe(&self) -> String {
        format!("{} x{}", self.unit, self.scale)
    }
}

fn main() {
    assert_eq!(<Gauge as Component>::INJECT, &["unit", "scale"]);
    assert_eq!(Gauge::unitless(2).scale, 2);
}
