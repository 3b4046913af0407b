/// Collision-resistant identifier source for new posts.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}
