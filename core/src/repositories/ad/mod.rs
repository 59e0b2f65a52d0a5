pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use r#trait::AdRepository;
pub use memory::InMemoryAdRepository;

#[cfg(test)]
mod tests;
