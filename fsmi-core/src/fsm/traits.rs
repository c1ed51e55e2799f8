/// A finite-state machine that can hand out simulators over itself.
pub trait Simulatable {
    type Simulator<'a>: Simulate
    where
        Self: 'a;

    /// Creates a simulator positioned at the start state.
    fn to_simulator(&self) -> Self::Simulator<'_>;
}

pub trait Simulate {
    /// Simulates the finite-state machine from start to finish and returns whether it accepts the
    /// input.
    fn run(mut self, input: &str) -> bool
    where
        Self: Sized,
    {
        self.feed_str(input)
    }

    /// Returns whether the finite-state machine currently accepts.
    fn is_accepting(&self) -> bool;

    /// Feeds a single character to the finite-state machine and returns whether it has reached an
    /// accepting state.
    fn feed(&mut self, input: char) -> bool;

    /// Feeds an entire string to the finite-state machine at once and returns whether it has
    /// reached an accepting state. Feeding an empty string leaves the machine as is.
    fn feed_str(&mut self, input: &str) -> bool {
        let accept = self.is_accepting();
        input.chars().map(|c| self.feed(c)).last().unwrap_or(accept)
    }
}
