use crossterm::event::Event;

/// Scripted input for headless debug runs: events are keyed by frame number
/// and handed out when the loop reaches that frame.
pub struct SimulatedInput {
    events: Vec<(u64, Event)>,
}

impl SimulatedInput {
    pub fn new(mut events: Vec<(u64, Event)>) -> Self {
        events.sort_by_key(|(frame, _)| *frame);
        SimulatedInput { events }
    }

    /// All events scheduled for this frame, in script order.
    pub fn take(&mut self, frame: u64) -> Vec<Event> {
        let mut due = Vec::new();
        self.events.retain(|(at, event)| {
            if *at == frame {
                due.push(event.clone());
                false
            } else {
                true
            }
        });
        due
    }
}
