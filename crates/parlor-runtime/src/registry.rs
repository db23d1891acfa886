use std::collections::HashMap;

use parlor_core::catalog::GameKind;
use parlor_core::game::PortalGame;

/// Factory function type for creating engine instances.
type EngineFactory = fn() -> Box<dyn PortalGame>;

/// Registry mapping game kinds to engine factories. Catalog entries
/// without a registered engine are playable in name only: their
/// sessions carry no board and ignore moves.
pub struct EngineRegistry {
    factories: HashMap<GameKind, EngineFactory>,
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register_defaults();
        registry
    }

    /// A registry with no engines at all, for tests.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    fn register_defaults(&mut self) {
        #[cfg(feature = "tictactoe")]
        self.factories.insert(GameKind::TicTacToe, || {
            Box::new(parlor_tictactoe::TicTacToe::new())
        });
        #[cfg(feature = "memory")]
        self.factories
            .insert(GameKind::Memory, || Box::new(parlor_memory::MemoryGame::new()));
    }

    pub fn register(&mut self, kind: GameKind, factory: EngineFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn create(&self, kind: GameKind) -> Option<Box<dyn PortalGame>> {
        self.factories.get(&kind).map(|f| f())
    }

    pub fn supports(&self, kind: GameKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Return the number of registered engine types.
    pub fn available_games(&self) -> usize {
        self.factories.len()
    }
}
