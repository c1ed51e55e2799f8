pub(super) mod dot;
pub(super) mod minimize;
pub(super) mod model;
pub(super) mod sim;
