use crate::*;
use num_enum::TryFromPrimitive;

/// Election phase
///
/// Phases only ever move forward, one step at a time:
/// `Registration -> Commit -> Reveal -> Results`.
#[derive(
    Serialize, Deserialize, TryFromPrimitive, Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    Registration = 0,
    Commit = 1,
    Reveal = 2,
    Results = 3,
}

impl Phase {
    /// The phase that follows this one, `None` for `Results`
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Registration => Some(Phase::Commit),
            Phase::Commit => Some(Phase::Reveal),
            Phase::Reveal => Some(Phase::Results),
            Phase::Results => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Phase::Registration => "Registration",
            Phase::Commit => "Commit",
            Phase::Reveal => "Reveal",
            Phase::Results => "Results",
        };
        write!(f, "{}", name)
    }
}

impl ElectionRecord {
    pub(crate) fn require_phase(&self, expected: Phase) -> Result<(), ProtocolError> {
        let actual = self.election.phase;
        if actual != expected {
            return Err(ProtocolError::WrongPhase { expected, actual });
        }
        Ok(())
    }

    /// Move to the next phase
    pub(crate) fn advance_phase(&mut self, caller: &Principal) -> Result<Phase, ProtocolError> {
        self.ensure_admin(caller)?;
        let next = self
            .election
            .phase
            .next()
            .ok_or(ProtocolError::TerminalPhase)?;

        self.enter_phase(next);
        Ok(next)
    }

    /// Move to an explicitly numbered phase.
    ///
    /// The number must name the phase directly after the current one.
    pub(crate) fn set_phase(&mut self, caller: &Principal, number: u8) -> Result<Phase, ProtocolError> {
        self.ensure_admin(caller)?;
        let target =
            Phase::try_from_primitive(number).map_err(|_| ProtocolError::InvalidPhase(number))?;

        let current = self.election.phase;
        let next = current.next().ok_or(ProtocolError::TerminalPhase)?;
        if target != next {
            return Err(ProtocolError::IllegalTransition {
                from: current,
                to: target,
            });
        }

        self.enter_phase(next);
        Ok(next)
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.election.phase = phase;
        self.events.push(Event::PhaseChanged { phase });
    }
}
