//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::{Expr, Op, Symbol};
    use crate::symbolic::symbolic_errors::SymbolicError;
    use crate::symbolic::symbolic_evaluate::Context;
    use crate::symbolic::symbolic_vectors::{SymbolicVector, VectorSymbol};
    use crate::symbols;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;
    use strum::IntoEnumIterator;

    fn context(pairs: &[(&str, f64)]) -> Context {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    /// random well-formed tree over x, y and a few literals; every operator tag can appear
    fn random_tree(rng: &mut StdRng, depth: usize) -> Expr {
        let leaves = [
            Expr::symbol("x"),
            Expr::symbol("y"),
            Expr::Const(0.0),
            Expr::Const(1.0),
            Expr::Const(2.0),
            Expr::Const(-1.0),
            Expr::Const(0.5),
        ];
        if depth == 0 || rng.random_bool(0.2) {
            return leaves[rng.random_range(0..leaves.len())].clone();
        }
        let ops: Vec<Op> = Op::iter().collect();
        let op = ops[rng.random_range(0..ops.len())];
        match op {
            Op::Partial | Op::Integral => {
                Expr::binary(op, random_tree(rng, depth - 1), Expr::symbol("x"))
            }
            _ if op.is_unary() => Expr::unary(op, random_tree(rng, depth - 1)),
            _ => Expr::binary(op, random_tree(rng, depth - 1), random_tree(rng, depth - 1)),
        }
    }

    //___________________________________CONSTRUCTION____________________________________

    #[test]
    fn test_operators_build_nodes_in_order() {
        let (x, y) = symbols!(x, y);
        assert_eq!(&x - &y, Expr::binary(Op::Sub, x.clone(), y.clone()));
        assert_eq!(2.0 / &x, Expr::binary(Op::Div, 2.0, x.clone()));
        assert_eq!(&x * 2.0, Expr::binary(Op::Mul, x.clone(), 2.0));
        assert_eq!(-&x, Expr::binary(Op::Mul, -1.0, x.clone()));
        assert_eq!(x.pow(&y), Expr::binary(Op::Pow, x.clone(), y.clone()));
        // nothing is evaluated at construction
        assert_eq!(Expr::Const(2.0) + 3.0, Expr::binary(Op::Add, 2.0, 3.0));
    }

    #[test]
    fn test_symbols_constructors() {
        let vars = Expr::symbols("x, y,, z ");
        assert_eq!(vars, vec![Expr::symbol("x"), Expr::symbol("y"), Expr::symbol("z")]);
        let (a, b, c) = symbols!(a, b, c);
        assert_eq!(a.to_string() + &b.to_string() + &c.to_string(), "abc");
        assert_eq!(Expr::constant(4.5), Expr::from(4.5));
        assert_eq!(Expr::from(Symbol::new("q")), Expr::symbol("q"));
    }

    #[test]
    fn test_symbol_equality_ignores_function_flag() {
        assert_eq!(Symbol::new("E_x"), Symbol::function("E_x"));
        assert_eq!(Expr::symbol("E_x"), Expr::function_symbol("E_x"));
        assert_ne!(Symbol::new("a"), Symbol::new("b"));
    }

    #[test]
    fn test_display() {
        let x = Expr::symbol("x");
        let dx = Symbol::new("x");
        assert_eq!((x.pow(2.0) + 2.0 * &x).to_string(), "((x ^ 2) + (2 * x))");
        assert_eq!((&x / 2.0 - 1.0).to_string(), "((x / 2) - 1)");
        assert_eq!((-&x).to_string(), "(-1 * x)");
        assert_eq!(x.abs().to_string(), "|x|");
        assert_eq!(x.sqrt().to_string(), "sqrt(x)");
        assert_eq!(x.log10().to_string(), "log(x, 10)");
        assert_eq!(
            Expr::function_symbol("f").partial(&dx).to_string(),
            "d(f)/d(x)"
        );
        assert_eq!(x.integral(&dx).to_string(), "∫(x) dx");
    }

    #[test]
    fn test_op_tags() {
        assert_eq!("**".parse::<Op>().unwrap(), Op::Pow);
        assert_eq!("sin".parse::<Op>().unwrap(), Op::Sin);
        assert_eq!(Op::Partial.to_string(), "partial");
        assert_eq!(Op::Div.as_ref(), "/");
        assert!("sinh".parse::<Op>().is_err());
        assert_eq!(Op::iter().count(), 21);
        assert_eq!(Op::iter().filter(|op| op.arity() == 2).count(), 8);
    }

    //___________________________________STRUCTURAL UTILITIES____________________________________

    #[test]
    fn test_free_symbols_and_dependence() {
        let (x, y, z) = symbols!(x, y, z);
        let expr = &x * &y + z.sin() + &x;
        assert_eq!(expr.free_symbols(), vec!["x", "y", "z"]);
        assert!(expr.contains_symbol("z"));
        assert!(!expr.contains_symbol("w"));
        assert!(!expr.depends_on("w"));
        let field = Expr::function_symbol("E_x") * 2.0;
        assert!(field.depends_on("t"));
        assert!(!field.contains_symbol("t"));
    }

    #[test]
    fn test_substitution_and_renaming() {
        let (x, y) = symbols!(x, y);
        let expr = x.pow(2.0) + &y;
        let substituted = expr.substitute("x", &(&y + 1.0));
        assert_eq!(substituted.evaluate_with(&[("y", 2.0)]).unwrap(), 11.0);
        assert_eq!(expr.set_symbol("x", 3.0).evaluate_with(&[("y", 1.0)]).unwrap(), 10.0);

        let renamed = (Expr::function_symbol("B_x") + &x).rename_symbol("B_x", "C_x");
        assert_eq!(renamed.free_symbols(), vec!["C_x", "x"]);
        assert!(renamed.depends_on("anything"));
    }

    #[test]
    fn test_node_count_and_depth() {
        let (x, y) = symbols!(x, y);
        let expr = (&x + 2.0) * y.sin();
        assert_eq!(expr.node_count(), 6);
        assert_eq!(expr.depth(), 3);
        assert_eq!(x.node_count(), 1);
        assert_eq!(x.depth(), 1);
    }

    //___________________________________EVALUATION____________________________________

    #[test]
    fn test_simplify_then_evaluate_scenario() {
        let x = Expr::symbol("x");
        let expr = (&x * 0.0 + &x).simplify();
        assert_eq!(expr, x);
        for a in [-3.5, 0.0, 2.0, 1e6] {
            assert_eq!(expr.evaluate_with(&[("x", a)]).unwrap(), a);
        }
    }

    #[test]
    fn test_unbound_leaf() {
        let (x, z) = symbols!(x, z);
        let err = (&x + &z).evaluate_with(&[("x", 1.0)]).unwrap_err();
        assert_eq!(
            err,
            SymbolicError::UnboundSymbol {
                name: "z".to_string()
            }
        );
        assert_eq!(err.to_string(), "symbol 'z' has no value in the provided context");
    }

    #[test]
    fn test_division_by_zero_is_domain_error() {
        let x = Expr::symbol("x");
        let expr = &x / 0.0;
        assert!(matches!(
            expr.evaluate_with(&[("x", 1.0)]),
            Err(SymbolicError::Domain { function: "div", .. })
        ));
        // kept by the simplifier
        assert_eq!(expr.simplify(), expr);
        assert_eq!((Expr::Const(1.0) / 0.0).simplify(), Expr::binary(Op::Div, 1.0, 0.0));
    }

    #[test]
    fn test_exp_ln_round_trip() {
        let v = Expr::symbol("v");
        let expr = v.ln().exp();
        for value in [0.01, 0.5, 1.0, 3.0, 250.0] {
            assert_relative_eq!(
                expr.evaluate_with(&[("v", value)]).unwrap(),
                value,
                max_relative = 1e-12
            );
        }
        assert!(expr.evaluate_with(&[("v", -1.0)]).is_err());
    }

    #[test]
    fn test_pythagorean_identity() {
        let x = Expr::symbol("x");
        let expr = x.sin().pow(2.0) + x.cos().pow(2.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let value: f64 = rng.random_range(-10.0..10.0);
            assert_abs_diff_eq!(
                expr.evaluate_with(&[("x", value)]).unwrap(),
                1.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_evaluate_batch_keeps_order() {
        let x = Expr::symbol("x");
        let expr = x.pow(2.0) + 1.0;
        let contexts: Vec<Context> = (0..50).map(|i| context(&[("x", i as f64)])).collect();
        let results = expr.evaluate_batch(&contexts);
        assert_eq!(results.len(), 50);
        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap(), (i * i) as f64 + 1.0);
        }
        let missing = expr.evaluate_batch(&[Context::new()]);
        assert!(matches!(missing[0], Err(SymbolicError::UnboundSymbol { .. })));
    }

    //___________________________________DIFFERENTIATION____________________________________

    #[test]
    fn test_power_rule() {
        let x = Expr::symbol("x");
        let df = x.pow(3.0).diff("x").simplify();
        assert_eq!(df.evaluate_with(&[("x", 5.0)]).unwrap(), 75.0);
    }

    #[test]
    fn test_polynomial_derivative() {
        let x = Expr::symbol("x");
        let df = (x.pow(2.0) + 2.0 * &x).diff("x").simplify();
        assert_eq!(df.evaluate_with(&[("x", 5.0)]).unwrap(), 12.0);
        assert_eq!(df.to_string(), "((2 * x) + 2)");
    }

    #[test]
    fn test_product_quotient_and_chain_rules() {
        let x = Expr::symbol("x");
        let product = (&x * x.sin()).diff("x");
        let at = 0.7_f64;
        assert_relative_eq!(
            product.evaluate_with(&[("x", at)]).unwrap(),
            at.sin() + at * at.cos(),
            epsilon = 1e-12
        );
        let quotient = (x.sin() / &x).diff("x");
        assert_relative_eq!(
            quotient.evaluate_with(&[("x", at)]).unwrap(),
            (at * at.cos() - at.sin()) / (at * at),
            epsilon = 1e-12
        );
        let chain = (2.0 * &x).exp().diff("x");
        assert_relative_eq!(
            chain.evaluate_with(&[("x", at)]).unwrap(),
            2.0 * (2.0 * at).exp(),
            epsilon = 1e-12
        );
        let log2 = x.log(2.0).diff("x");
        assert_relative_eq!(
            log2.evaluate_with(&[("x", 4.0)]).unwrap(),
            1.0 / (4.0 * 2.0_f64.ln()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_elementary_derivatives_match_finite_differences() {
        let x = Expr::symbol("x");
        let functions = vec![
            x.sin(),
            x.cos(),
            x.tan(),
            x.sec(),
            x.csc(),
            x.cot(),
            x.exp(),
            x.ln(),
            x.log10(),
            x.asin(),
            x.acos(),
            x.atan(),
            (x.pow(2.0) + 1.0).ln() * x.cos(),
        ];
        for f in functions {
            let (deviation, within) = f.check_derivative("x", &[0.2, 0.5, 0.8], 1e-6).unwrap();
            assert!(within, "derivative of {} deviates by {}", f, deviation);
        }
    }

    #[test]
    fn test_power_rule_with_variable_exponent_is_kept() {
        let x = Expr::symbol("x");
        let f = x.pow(&x);
        // v * u^(v-1) * du, the ln(u) term is not produced
        let df = f.diff("x").simplify();
        assert_relative_eq!(df.evaluate_with(&[("x", 2.0)]).unwrap(), 4.0, epsilon = 1e-12);
        let (deviation, within) = f.check_derivative("x", &[2.0], 1e-6).unwrap();
        assert!(!within);
        assert!(deviation > 2.0);
    }

    #[test]
    fn test_check_derivative_needs_a_single_variable() {
        let (x, y) = symbols!(x, y);
        assert!(matches!(
            (&x * &y).check_derivative("x", &[1.0], 1e-6),
            Err(SymbolicError::UnboundSymbol { .. })
        ));
    }

    #[test]
    fn test_mixed_partial_to_numeric() {
        let (x, y) = symbols!(x, y);
        let f = (x.pow(2.0) * y.sin()).diff("x").to_numeric(&["x", "y"]);
        assert_relative_eq!(f(&[5.0, PI / 2.0]).unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_function_valued_leaf_derivatives() {
        let e_x = Expr::function_symbol("E_x");
        let x = Symbol::new("x");
        let y = Symbol::new("y");
        let d = e_x.derive(&x);
        assert_eq!(d, e_x.partial(&x));
        // a plain leaf other than the variable is a constant
        assert_eq!(Expr::symbol("a").derive(&x), Expr::Const(0.0));
        // the partial node itself
        assert_eq!(d.derive(&x), Expr::Const(1.0));
        assert_eq!(d.derive(&y), Expr::Const(0.0));
        // chain rule through an unresolved derivative
        let chained = e_x.sin().derive(&x).simplify();
        assert_eq!(chained, e_x.cos() * e_x.partial(&x));
    }

    #[test]
    fn test_unresolved_derivatives() {
        let x = Expr::symbol("x");
        let wrt = Symbol::new("x");
        for expr in [x.sqrt(), x.abs(), x.integral(&wrt)] {
            let d = expr.derive(&wrt);
            assert_eq!(d, expr.partial(&wrt));
            assert!(matches!(
                d.evaluate_with(&[("x", 1.0)]),
                Err(SymbolicError::MalformedTree { op: Op::Partial, .. })
            ));
        }
    }

    #[test]
    fn test_derive_n() {
        let x = Expr::symbol("x");
        let second = x.pow(3.0).derive_n("x", 2);
        assert_eq!(second.evaluate_with(&[("x", 2.0)]).unwrap(), 12.0);
        let fourth = x.sin().derive_n("x", 4);
        assert_relative_eq!(
            fourth.evaluate_with(&[("x", 0.3)]).unwrap(),
            0.3_f64.sin(),
            epsilon = 1e-12
        );
        assert_eq!((&x * 1.0).derive_n("x", 0), x);
    }

    #[test]
    fn test_gradient() {
        let (x, y) = symbols!(x, y);
        let f = x.pow(2.0) * &y + y.sin();
        let grad = f.gradient(&["x", "y"]);
        assert_eq!(grad.len(), 2);
        let at = [("x", 1.0), ("y", 2.0)];
        assert_relative_eq!(grad[0].evaluate_with(&at).unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(
            grad[1].evaluate_with(&at).unwrap(),
            1.0 + 2.0_f64.cos(),
            epsilon = 1e-12
        );
    }

    //___________________________________INTEGRATION____________________________________

    #[test]
    fn test_antiderivative_base_cases() {
        let (x, y) = symbols!(x, y);
        assert_eq!(Expr::Const(3.0).integrate("x").to_string(), "(3 * x)");
        assert_eq!(x.integrate("x").to_string(), "((x ^ 2) / 2)");
        assert_eq!(y.integrate("x").to_string(), "(y * x)");
        let field = Expr::function_symbol("E_x");
        assert_eq!(field.integrate("x"), field.integral(&Symbol::new("x")));
    }

    #[test]
    fn test_antiderivative_power_rules() {
        let x = Expr::symbol("x");
        assert_eq!(x.pow(3.0).integrate("x").to_string(), "((x ^ 4) / 4)");
        assert_eq!(x.pow(-1.0).integrate("x").to_string(), "ln(|x|)");
        // the exponent is simplified before the table lookup
        assert_eq!(x.pow(-Expr::Const(1.0)).integrate("x").to_string(), "ln(|x|)");
        assert_eq!(
            x.pow(Expr::Const(1.0) + 2.0).integrate("x").to_string(),
            "((x ^ 4) / 4)"
        );
        let exponential = Expr::Const(2.0).pow(&x).integrate("x");
        assert_relative_eq!(
            exponential.evaluate_with(&[("x", 3.0)]).unwrap(),
            8.0 / 2.0_f64.ln(),
            epsilon = 1e-12
        );
        assert_eq!(Expr::Const(1.0).pow(&x).integrate("x"), x);
    }

    #[test]
    fn test_antiderivative_table_differentiates_back() {
        let x = Expr::symbol("x");
        let integrands = vec![
            x.sin(),
            x.cos(),
            x.tan(),
            x.sec(),
            x.csc(),
            x.cot(),
            x.exp(),
            x.ln(),
            x.log(3.0),
            x.asin(),
            x.acos(),
            x.atan(),
            3.0 * x.cos(),
            x.exp() * 2.0,
            x.pow(2.5) / 4.0,
            x.sin() - x.pow(2.0),
        ];
        let h = 1e-6;
        for f in integrands {
            let antiderivative = f.integrate("x").simplify();
            for point in [0.3, 0.7] {
                let forward = antiderivative.evaluate_with(&[("x", point + h)]).unwrap();
                let backward = antiderivative.evaluate_with(&[("x", point - h)]).unwrap();
                let expected = f.evaluate_with(&[("x", point)]).unwrap();
                assert_relative_eq!(
                    (forward - backward) / (2.0 * h),
                    expected,
                    epsilon = 1e-6,
                    max_relative = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_unresolved_antiderivatives() {
        let x = Expr::symbol("x");
        for expr in [
            &x * x.sin(),
            (2.0 * &x).sin(),
            x.sqrt(),
            x.abs(),
            1.0 / &x,
        ] {
            let integral = expr.integrate("x");
            assert_eq!(integral.op(), Some(Op::Integral), "{}", expr);
        }
        // termwise: only the failing term stays unresolved
        let sum = (x.cos() + &x * x.exp()).integrate("x");
        assert_eq!(sum.op(), Some(Op::Add));
    }

    #[test]
    fn test_definite_antiderive() {
        let (a, x) = symbols!(a, x);
        let area = x
            .pow(2.0)
            .definite_antiderive("x", 0.0, 3.0, &Context::new())
            .unwrap();
        assert_relative_eq!(area, 9.0, epsilon = 1e-12);
        let scaled = (&a * &x)
            .definite_antiderive("x", 0.0, 2.0, &context(&[("a", 3.0)]))
            .unwrap();
        assert_relative_eq!(scaled, 6.0, epsilon = 1e-12);
        let sine = x.sin().definite_antiderive("x", 0.0, PI, &Context::new()).unwrap();
        assert_relative_eq!(sine, 2.0, epsilon = 1e-12);
        assert!(matches!(
            (&x * x.sin()).definite_antiderive("x", 0.0, 1.0, &Context::new()),
            Err(SymbolicError::MalformedTree { op: Op::Integral, .. })
        ));
    }

    //___________________________________SIMPLIFICATION____________________________________

    #[test]
    fn test_simplification_identities() {
        let (x, y) = symbols!(x, y);
        assert_eq!((0.0 + &x).simplify(), x);
        assert_eq!((&x - 0.0).simplify(), x);
        assert_eq!((&x - &x).simplify(), Expr::Const(0.0));
        assert_eq!((0.0 * &x).simplify(), Expr::Const(0.0));
        assert_eq!((1.0 * &x).simplify(), x);
        assert_eq!((0.0 / &x).simplify(), Expr::Const(0.0));
        assert_eq!((&x / 1.0).simplify(), x);
        assert_eq!((&x / &x).simplify(), Expr::Const(1.0));
        assert_eq!(x.pow(0.0).simplify(), Expr::Const(1.0));
        assert_eq!(x.pow(1.0).simplify(), x);
        assert_eq!(Expr::Const(1.0).pow(&y).simplify(), Expr::Const(1.0));
        assert_eq!((&x + &y).simplify(), &x + &y);
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!((Expr::Const(2.0) + 3.0).simplify(), Expr::Const(5.0));
        assert_eq!(
            (Expr::Const(2.0).pow(3.0) - 1.0).simplify(),
            Expr::Const(7.0)
        );
        assert_eq!(
            Expr::unary(Op::Cos, 0.0).simplify(),
            Expr::Const(1.0)
        );
        // out-of-domain literals are left alone
        let root = Expr::Const(-8.0).pow(0.5);
        assert_eq!(root.simplify(), root);
        let log = Expr::unary(Op::Ln, -1.0);
        assert_eq!(log.simplify(), log);
    }

    #[test]
    fn test_unresolved_nodes_survive_simplify_and_fail_evaluation() {
        let x = Symbol::new("x");
        let f = Expr::function_symbol("f");
        let partial = f.partial(&x);
        let integral = (Expr::symbol("x") * 1.0).integral(&x);
        assert_eq!(partial.simplify(), partial);
        assert_eq!(
            integral.simplify(),
            Expr::symbol("x").integral(&x)
        );
        assert_eq!((partial.clone() * 1.0).simplify(), partial);
        let ctx = context(&[("f", 1.0), ("x", 1.0)]);
        assert!(matches!(
            partial.evaluate(&ctx),
            Err(SymbolicError::MalformedTree { op: Op::Partial, .. })
        ));
        assert!(matches!(
            integral.evaluate(&ctx),
            Err(SymbolicError::MalformedTree { op: Op::Integral, .. })
        ));
        // checked before the operands, so unbound leaves inside do not matter
        assert!(matches!(
            partial.evaluate(&Context::new()),
            Err(SymbolicError::MalformedTree { .. })
        ));
    }

    #[test]
    fn test_simplify_is_idempotent_on_random_trees() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let tree = random_tree(&mut rng, 3);
            let once = tree.simplify();
            assert_eq!(once.simplify(), once, "tree: {}", tree);
        }
    }

    #[test]
    fn test_overflowing_literals_are_not_folded() {
        let big = Expr::Const(1e200) * 1e200;
        assert_eq!(big.simplify(), big);
        let once = (big.clone() - big.clone()).simplify();
        assert_eq!(once, Expr::Const(0.0));
        assert_eq!(once.simplify(), once);
        let sum = (big.clone() + big.clone()).simplify();
        assert_eq!(sum.simplify(), sum);
        assert!(matches!(
            big.evaluate(&Context::new()),
            Err(SymbolicError::Domain { function: "mul", .. })
        ));
        let (x, y) = symbols!(x, y);
        assert!(matches!(
            (&x * &y).evaluate_with(&[("x", 1e200), ("y", 1e200)]),
            Err(SymbolicError::Domain { function: "mul", .. })
        ));
        assert!(matches!(
            (&x * &y).to_numeric(&["x", "y"])(&[1e200, 1e200]),
            Err(SymbolicError::Domain { .. })
        ));
    }

    #[test]
    fn test_simplify_preserves_value_on_random_trees() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..500 {
            let tree = random_tree(&mut rng, 3);
            let x: f64 = rng.random_range(0.1..2.0);
            let y: f64 = rng.random_range(0.1..2.0);
            let Ok(value) = tree.evaluate_with(&[("x", x), ("y", y)]) else {
                continue;
            };
            let simplified = tree.simplify().evaluate_with(&[("x", x), ("y", y)]).unwrap();
            assert_relative_eq!(simplified, value, max_relative = 1e-12);
            let compiled = tree.to_numeric(&["x", "y"]);
            assert_eq!(compiled(&[x, y]).unwrap(), simplified);
        }
    }

    //___________________________________OPERATOR COVERAGE____________________________________

    #[test]
    fn test_every_operator_is_handled_by_every_transformation() {
        let x = Expr::symbol("x");
        let wrt = Symbol::new("x");
        let ctx = context(&[("x", 0.5)]);
        for op in Op::iter() {
            let node = if op.is_unary() {
                Expr::unary(op, x.clone())
            } else if matches!(op, Op::Partial | Op::Integral) {
                Expr::binary(op, x.sin(), x.clone())
            } else {
                Expr::binary(op, x.clone(), 2.0)
            };
            let derivative = node.derive(&wrt);
            let antiderivative = node.antiderive(&wrt);
            let simplified = node.simplify();
            assert_eq!(simplified.simplify(), simplified);
            assert!(!node.to_string().is_empty());
            match op {
                Op::Partial | Op::Integral => {
                    assert!(matches!(
                        node.evaluate(&ctx),
                        Err(SymbolicError::MalformedTree { .. })
                    ));
                    assert_eq!(antiderivative, node.integral(&wrt));
                }
                _ => {
                    assert!(node.evaluate(&ctx).is_ok(), "{}", node);
                    assert_eq!(
                        simplified.evaluate(&ctx).unwrap(),
                        node.evaluate(&ctx).unwrap()
                    );
                }
            }
            match op {
                Op::Sqrt | Op::Abs | Op::Integral => {
                    assert_eq!(derivative, node.partial(&wrt))
                }
                Op::Partial => assert_eq!(derivative, Expr::Const(1.0)),
                _ => assert!(derivative.evaluate(&ctx).is_ok(), "d/dx {}", node),
            }
        }
    }

    #[test]
    fn test_malformed_shapes() {
        let x = Expr::symbol("x");
        let wrt = Symbol::new("x");
        let unary_add = Expr::unary(Op::Add, x.clone());
        let binary_sin = Expr::binary(Op::Sin, x.clone(), x.clone());
        for node in [&unary_add, &binary_sin] {
            assert!(matches!(
                node.evaluate_with(&[("x", 1.0)]),
                Err(SymbolicError::MalformedTree { .. })
            ));
            assert_eq!(node.derive(&wrt), node.partial(&wrt));
            assert_eq!(node.antiderive(&wrt), node.integral(&wrt));
            assert!(node.to_numeric(&["x"])(&[1.0]).is_err());
        }
    }

    //___________________________________VECTORS____________________________________

    #[test]
    fn test_triple_product_vanishes() {
        let e = VectorSymbol::new("E");
        let b = VectorSymbol::new("B");
        let triple = b.dot(&e.cross(&b));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let mut ctx = Context::new();
            for name in e.component_names().iter().chain(b.component_names().iter()) {
                ctx.insert(name.clone(), rng.random_range(-5.0..5.0));
            }
            assert_abs_diff_eq!(triple.evaluate(&ctx).unwrap(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_lorentz_force() {
        let e = VectorSymbol::new("E");
        let b = VectorSymbol::new("B");
        let v = VectorSymbol::new("v");
        let q = Expr::symbol("q");
        let force = &q * (&e + v.cross(&b));
        let ctx = context(&[
            ("q", 2.0),
            ("E_x", 1.0),
            ("E_y", 0.0),
            ("E_z", 0.0),
            ("v_x", 0.0),
            ("v_y", 1.0),
            ("v_z", 0.0),
            ("B_x", 0.0),
            ("B_y", 0.0),
            ("B_z", 1.0),
        ]);
        let value = force.evaluate(&ctx).unwrap();
        assert_abs_diff_eq!(value, nalgebra::Vector3::new(4.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
