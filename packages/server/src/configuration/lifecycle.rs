/// How a configuration is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionMode {
    /// Keep the row with `active = false`; orders or quotes still point at it.
    Soft,
    /// Remove the configuration and its doors.
    Hard,
}

pub fn deletion_mode(linked_orders: u64, linked_quotes: u64) -> DeletionMode {
    if linked_orders > 0 || linked_quotes > 0 {
        DeletionMode::Soft
    } else {
        DeletionMode::Hard
    }
}
