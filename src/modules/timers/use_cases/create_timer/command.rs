#[derive(Debug, Clone)]
pub struct CreateTimer {
    pub name: String,
}
