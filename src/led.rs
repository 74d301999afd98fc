//! LED hardware abstraction.

/// Trait for abstracting LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, LED strip, etc.) to let a
/// [`Blinker`](crate::Blinker) drive it. `V` is the value type the LED
/// accepts: [`Level`](crate::Level) for monochrome LEDs, [`Color`](crate::Color)
/// for RGB LEDs.
///
/// Both methods are called while the blinker holds its lock, so they must be
/// fast and non-blocking (register writes, not bus transactions that wait).
/// Handle any hardware errors internally - these methods cannot fail.
pub trait Led<V> {
    /// Sets the LED to the specified value immediately.
    fn set_value(&mut self, value: V);

    /// Starts a hardware fade from the current output to `target`.
    ///
    /// Returns `true` if the hardware will reach `target` on its own within
    /// `duration_millis`, in which case the blinker simply waits. Returns
    /// `false` if fading is not supported, and the blinker interpolates in
    /// software instead. The default implementation declines.
    fn fade(&mut self, target: V, duration_millis: u16) -> bool {
        let _ = (target, duration_millis);
        false
    }
}

impl<V, L: Led<V> + ?Sized> Led<V> for &mut L {
    fn set_value(&mut self, value: V) {
        (**self).set_value(value)
    }

    fn fade(&mut self, target: V, duration_millis: u16) -> bool {
        (**self).fade(target, duration_millis)
    }
}
