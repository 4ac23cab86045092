mod online_state;
mod persona_state;
mod visibility;

pub use online_state::OnlineState;
pub use persona_state::PersonaState;
pub use visibility::Visibility;
