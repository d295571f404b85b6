mod equality;
mod explain;
mod invariants;
