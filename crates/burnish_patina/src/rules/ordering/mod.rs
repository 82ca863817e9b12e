//! Section and property order.

mod property_order;
mod section_order;

pub use property_order::PropertyOrder;
pub use section_order::SectionOrder;
