/// Named protocol revisions, in activation order.
///
/// Gas and cleanup rules key off the position in this order, so the derived
/// `Ord` (declaration order) is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString, serde::Serialize, serde::Deserialize)]
pub enum Revision {
    Frontier,
    Homestead,
    TangerineWhistle,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    Berlin,
}
