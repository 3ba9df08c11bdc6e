/// A tick source with a fixed rate, named at the type level.
pub trait Tick: Send {
    /// The tick frequency, i.e. the number of ticks per second.
    const FREQ: u32;
}
