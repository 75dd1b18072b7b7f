use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// Hands back a layout that was decided up front, used to replay known boards.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefield(pub MineLayout);

impl MinefieldGenerator for FixedMinefield {
    fn generate(self, config: GameConfig) -> MineLayout {
        if self.0.game_config() != config {
            log::warn!(
                "Fixed layout {:?} does not match requested {:?}, using the layout",
                self.0.game_config(),
                config
            );
        }
        self.0
    }
}
