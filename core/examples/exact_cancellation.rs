use irrat_core::Rational;

fn main() -> Result<(), irrat_core::IrratError> {
    let a = Rational::new(5, 7)?;
    let b = Rational::new(5476, 1053)?;
    // (5 * 1053) / (7 * 5476)
    let c = &a / &b;
    println!("{}", c.to_f64());
    println!("{c:?}");

    // 53 is above the primes tried on every operation, so it only cancels
    // once the product is shown
    let d = Rational::new(47 * 53, 3 * 3 * 23)?;
    let e = Rational::new(3 * 19, 53 * 73)?;
    let f = &d * &e;
    println!("{}", f.to_f64());
    println!("{f:?}");
    Ok(())
}
