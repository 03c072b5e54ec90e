use crate::effect::Effect;
use crate::platform::WindowManipulator;

/// Execute side effects.
pub fn execute_effects<M: WindowManipulator>(effects: Vec<Effect>, manipulator: &M) {
    for effect in effects {
        tracing::debug!("Executing {:?}", effect);
        match effect {
            Effect::SetSize { width, height } => {
                manipulator.set_size(width, height);
            }
            Effect::SetPosition { x, y } => {
                manipulator.set_position(x, y);
            }
            Effect::Maximize => {
                manipulator.maximize();
            }
            Effect::EnterFullscreen => {
                manipulator.enter_fullscreen();
            }
            Effect::Show => {
                manipulator.show();
            }
        }
    }
}
