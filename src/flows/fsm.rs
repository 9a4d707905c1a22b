use rust_fsm::*;

state_machine! {
    interaction_flow(Idle)

    Idle(HydrateSubmitted) => Submitted,
    Idle(HydrateResolved) => Resolved,

    Idle(Submit) => Submitted,
    Idle(Reset) => Idle,

    Submitted(Resolve) => Resolved,
    Submitted(Reset) => Idle,

    Resolved(Submit) => Submitted,
    Resolved(Reset) => Idle
}

state_machine! {
    detection_flow(Idle)

    Idle(HydrateImageSelected) => ImageSelected,
    Idle(HydrateAnalyzing) => Analyzing,
    Idle(HydrateResolved) => Resolved,

    Idle(SelectImage) => ImageSelected,
    Idle(Reset) => Idle,

    ImageSelected(SelectImage) => ImageSelected,
    ImageSelected(Analyze) => Analyzing,
    ImageSelected(Reset) => Idle,

    Analyzing(Resolve) => Resolved,
    Analyzing(Abandon) => ImageSelected,
    Analyzing(Reset) => Idle,

    Resolved(SelectImage) => ImageSelected,
    Resolved(Analyze) => Analyzing,
    Resolved(Reset) => Idle
}

/// Chat and crop recommendation lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Submitted,
    Resolved,
}

impl InteractionState {
    pub fn is_pending(self) -> bool {
        matches!(self, InteractionState::Submitted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionAction {
    Submit,
    Resolve,
    Reset,
}

fn hydrate_interaction(
    machine: &mut interaction_flow::StateMachine,
    state: InteractionState,
) -> Result<(), ()> {
    let input = match state {
        InteractionState::Idle => return Ok(()),
        InteractionState::Submitted => interaction_flow::Input::HydrateSubmitted,
        InteractionState::Resolved => interaction_flow::Input::HydrateResolved,
    };
    machine.consume(&input).map_err(|_| ())?;
    Ok(())
}

fn expected_interaction_state(
    current: InteractionState,
    action: InteractionAction,
) -> Option<InteractionState> {
    match (current, action) {
        (_, InteractionAction::Reset) => Some(InteractionState::Idle),
        (InteractionState::Idle | InteractionState::Resolved, InteractionAction::Submit) => {
            Some(InteractionState::Submitted)
        }
        (InteractionState::Submitted, InteractionAction::Resolve) => {
            Some(InteractionState::Resolved)
        }
        _ => None,
    }
}

pub fn interaction_transition(
    current: InteractionState,
    action: InteractionAction,
) -> Option<InteractionState> {
    let mut machine = interaction_flow::StateMachine::new();
    hydrate_interaction(&mut machine, current).ok()?;

    let input = match action {
        InteractionAction::Submit => interaction_flow::Input::Submit,
        InteractionAction::Resolve => interaction_flow::Input::Resolve,
        InteractionAction::Reset => interaction_flow::Input::Reset,
    };

    machine.consume(&input).ok()?;
    expected_interaction_state(current, action)
}

/// Disease detection lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionState {
    Idle,
    ImageSelected,
    Analyzing,
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionAction {
    SelectImage,
    Analyze,
    Resolve,
    /// The analysis was dropped before it resolved; the image stays.
    Abandon,
    Reset,
}

fn hydrate_detection(
    machine: &mut detection_flow::StateMachine,
    state: DetectionState,
) -> Result<(), ()> {
    let input = match state {
        DetectionState::Idle => return Ok(()),
        DetectionState::ImageSelected => detection_flow::Input::HydrateImageSelected,
        DetectionState::Analyzing => detection_flow::Input::HydrateAnalyzing,
        DetectionState::Resolved => detection_flow::Input::HydrateResolved,
    };
    machine.consume(&input).map_err(|_| ())?;
    Ok(())
}

fn expected_detection_state(
    current: DetectionState,
    action: DetectionAction,
) -> Option<DetectionState> {
    match (current, action) {
        (_, DetectionAction::Reset) => Some(DetectionState::Idle),
        (
            DetectionState::Idle | DetectionState::ImageSelected | DetectionState::Resolved,
            DetectionAction::SelectImage,
        ) => Some(DetectionState::ImageSelected),
        (
            DetectionState::ImageSelected | DetectionState::Resolved,
            DetectionAction::Analyze,
        ) => Some(DetectionState::Analyzing),
        (DetectionState::Analyzing, DetectionAction::Resolve) => Some(DetectionState::Resolved),
        (DetectionState::Analyzing, DetectionAction::Abandon) => {
            Some(DetectionState::ImageSelected)
        }
        _ => None,
    }
}

pub fn detection_transition(
    current: DetectionState,
    action: DetectionAction,
) -> Option<DetectionState> {
    let mut machine = detection_flow::StateMachine::new();
    hydrate_detection(&mut machine, current).ok()?;

    let input = match action {
        DetectionAction::SelectImage => detection_flow::Input::SelectImage,
        DetectionAction::Analyze => detection_flow::Input::Analyze,
        DetectionAction::Resolve => detection_flow::Input::Resolve,
        DetectionAction::Abandon => detection_flow::Input::Abandon,
        DetectionAction::Reset => detection_flow::Input::Reset,
    };

    machine.consume(&input).ok()?;
    expected_detection_state(current, action)
}
