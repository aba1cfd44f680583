//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::{EvalError, Expr};
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_operator_overloads_build_trees() {
        let expr = x() * Expr::Const(2.0) + Expr::Const(3.0);
        let expected = Expr::Add(
            Box::new(Expr::Mul(Box::new(x()), Box::new(Expr::Const(2.0)))),
            Box::new(Expr::Const(3.0)),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_neg() {
        let neg_expr = -x();
        let expected = Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(x()));
        assert_eq!(neg_expr, expected);
    }

    #[test]
    fn test_set_variable() {
        let expr = x().pow(Expr::Const(2.0)) + x();
        let substituted = expr.set_variable("x", 3.0);
        let expected = Expr::Const(3.0).pow(Expr::Const(2.0)) + Expr::Const(3.0);
        assert_eq!(substituted, expected);
    }

    #[test]
    fn test_set_variable_leaves_other_names() {
        let expr = x() + Expr::Var("t".to_string());
        let substituted = expr.set_variable("x", 1.0);
        assert_eq!(
            substituted.evaluate(),
            Err(EvalError::UnboundVariable("t".to_string()))
        );
    }

    #[test]
    fn test_evaluate_arithmetic() {
        let expr = (Expr::Const(7.0) - Expr::Const(1.0)) / Expr::Const(4.0);
        assert_eq!(expr.evaluate().unwrap(), 1.5);
    }

    #[test]
    fn test_integer_powers_are_exact() {
        let expr = x().pow(Expr::Const(2.0));
        assert_eq!(expr.eval_at("x", 10.0).unwrap(), 100.0);
        let expr = x().pow(Expr::Const(-2.0));
        assert_eq!(expr.eval_at("x", 2.0).unwrap(), 0.25);
        let expr = x().pow(Expr::Const(3.0));
        assert_eq!(expr.eval_at("x", -2.0).unwrap(), -8.0);
    }

    #[test]
    fn test_fractional_power() {
        let expr = x().pow(Expr::Const(0.5));
        assert_relative_eq!(expr.eval_at("x", 2.0).unwrap(), 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_to_zero_is_one() {
        let expr = x().pow(Expr::Const(0.0));
        assert_eq!(expr.eval_at("x", 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_division_by_zero() {
        let expr = Expr::Const(1.0) / (x() - Expr::Const(2.0));
        assert_eq!(expr.eval_at("x", 2.0), Err(EvalError::DivisionByZero));
        assert_eq!(expr.eval_at("x", 3.0), Ok(1.0));
    }

    #[test]
    fn test_zero_to_negative_power() {
        let expr = x().pow(Expr::Const(-1.0));
        assert_eq!(expr.eval_at("x", 0.0), Err(EvalError::ZeroToNegativePower(-1.0)));
    }

    #[test]
    fn test_negative_base_fractional_power() {
        let expr = x().pow(Expr::Const(0.5));
        assert_eq!(
            expr.eval_at("x", -4.0),
            Err(EvalError::NegativeBaseFractionalPower {
                base: -4.0,
                exponent: 0.5
            })
        );
    }

    #[test]
    fn test_no_symbolic_cancellation_before_substitution() {
        // x/x is not simplified to 1, so x = 0 is still a division by zero
        let expr = x() / x();
        assert_eq!(expr.eval_at("x", 0.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_display() {
        let expr = -(x() - Expr::Const(3.0)).pow(Expr::Const(2.0)) / Expr::Const(2.0);
        assert_eq!(expr.to_string(), "(((-1) * ((x - 3) ^ 2)) / 2)");
    }
}
