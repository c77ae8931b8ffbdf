use crate::force::Force;


// The color to move. Flips exactly once per accepted move, local or remote.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Turn {
    force: Force,
}

impl Turn {
    pub fn new(force: Force) -> Self { Turn { force } }
    pub fn force(self) -> Force { self.force }
    pub fn flip(&mut self) { self.force = self.force.opponent(); }
}
