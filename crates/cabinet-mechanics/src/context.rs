use crate::config::EngineConfig;
use crate::dice::Dice;
use crate::notice::NoticeSink;

/// Everything a mechanic needs besides the roster itself.
pub struct Court<'a> {
    /// Engine configuration.
    pub config: &'a EngineConfig,
    /// Source of every random draw.
    pub dice: &'a mut dyn Dice,
    /// Where player-facing messages go.
    pub notices: &'a mut dyn NoticeSink,
}

impl<'a> Court<'a> {
    /// Bundle configuration, dice and a notice sink.
    pub fn new(
        config: &'a EngineConfig,
        dice: &'a mut dyn Dice,
        notices: &'a mut dyn NoticeSink,
    ) -> Self {
        Self {
            config,
            dice,
            notices,
        }
    }

    /// Show a message to the player.
    pub fn notify(&mut self, message: &str, audio: Option<&str>) {
        self.notices.display(message, audio);
    }
}
