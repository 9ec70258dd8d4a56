use std::fmt;

/// Events a truck reports to its manager.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Notification {
    /// The truck is idle with nothing planned.  Repeats every wait quantum
    /// until the manager gives it something to do.
    Waiting,
    /// The truck reached a new node.
    LocationChanged,
    /// The node just reached has resting parcels.  Always directly follows
    /// the matching `LocationChanged`.
    ParcelAtNode,
}

impl Notification {
    pub fn as_str(self) -> &'static str {
        match self {
            Notification::Waiting         => "waiting",
            Notification::LocationChanged => "location_changed",
            Notification::ParcelAtNode    => "parcel_at_node",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
