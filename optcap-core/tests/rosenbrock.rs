use approx::assert_relative_eq;
use optcap_core::{
    Capability, CapabilitySet, Error, SparsityPattern, VectorDouble, capabilities,
    capability::{DimensionsBounds, Fitness, Gradient, GradientSparsity, Hessians, HessiansSparsity},
    conforms, problem, throw,
};

/// The Rosenbrock valley in `dimension` variables.
struct Rosenbrock {
    dimension: usize,
}

#[problem(require(Fitness, DimensionsBounds, Gradient))]
impl Rosenbrock {
    fn fitness(&self, x: &VectorDouble) -> VectorDouble {
        let value = x
            .windows(2)
            .map(|pair| 100.0 * (pair[1] - pair[0] * pair[0]).powi(2) + (1.0 - pair[0]).powi(2))
            .sum();
        vec![value]
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn bounds(&self) -> (VectorDouble, VectorDouble) {
        (vec![-5.0; self.dimension], vec![10.0; self.dimension])
    }

    fn name(&self) -> String {
        "Multidimensional Rosenbrock Function".into()
    }

    fn gradient(&self, x: &VectorDouble) -> VectorDouble {
        let mut gradient = vec![0.0; x.len()];
        for i in 0..x.len().saturating_sub(1) {
            let residual = x[i + 1] - x[i] * x[i];
            gradient[i] += -400.0 * x[i] * residual - 2.0 * (1.0 - x[i]);
            gradient[i + 1] += 200.0 * residual;
        }
        gradient
    }

    fn gradient_sparsity(&self) -> SparsityPattern {
        (0..self.dimension).map(|column| (0, column)).collect()
    }

    /// Lower triangle of the single hessian, in sparsity pattern order.
    fn hessians(&self, x: &VectorDouble) -> Vec<VectorDouble> {
        let n = x.len();
        let mut values = Vec::new();
        for i in 0..n {
            if i > 0 {
                values.push(-400.0 * x[i - 1]);
            }
            let mut diagonal = 0.0;
            if i + 1 < n {
                diagonal += 1200.0 * x[i] * x[i] - 400.0 * x[i + 1] + 2.0;
            }
            if i > 0 {
                diagonal += 200.0;
            }
            values.push(diagonal);
        }
        vec![values]
    }

    fn hessians_sparsity(&self) -> Vec<SparsityPattern> {
        let mut pattern = Vec::new();
        for i in 0..self.dimension {
            if i > 0 {
                pattern.push((i, i - 1));
            }
            pattern.push((i, i));
        }
        vec![pattern]
    }
}

/// Checks a decision vector against the box of a problem.
fn check_decision_vector<P: DimensionsBounds>(problem: &P, x: &VectorDouble) -> Result<(), Error> {
    if x.len() != problem.dimension() {
        throw!(
            Error,
            format!(
                "decision vector has length {} but the problem has dimension {}",
                x.len(),
                problem.dimension()
            )
        );
    }

    let (lower, upper) = problem.bounds();
    if x.iter().zip(lower.iter().zip(&upper)).any(|(v, (lo, hi))| v < lo || v > hi) {
        throw!(Error, "decision vector is outside the bounds");
    }
    Ok(())
}

fn evaluate<P: Fitness + DimensionsBounds>(problem: &P, x: &VectorDouble) -> Result<f64, Error> {
    check_decision_vector(problem, x)?;
    Ok(problem.fitness(x)[0])
}

#[test]
fn every_operation_is_detected() {
    const ROSENBROCK: CapabilitySet = capabilities!(Rosenbrock);

    assert!(conforms!(Rosenbrock, Name));
    assert!(!conforms!(Rosenbrock, ExtraInfo));
    assert!(!conforms!(Rosenbrock, Constraints));
    assert_eq!(ROSENBROCK.len(), 7);
    assert_eq!(
        ROSENBROCK.missing().iter().collect::<Vec<_>>(),
        [Capability::Constraints, Capability::ExtraInfo, Capability::ObjectiveCount]
    );
}

#[test]
fn forwarded_operations_evaluate() {
    let problem = Rosenbrock { dimension: 2 };

    assert_relative_eq!(evaluate(&problem, &vec![1.0, 1.0]).unwrap(), 0.0);
    assert_relative_eq!(evaluate(&problem, &vec![0.0, 0.0]).unwrap(), 1.0);

    let gradient = Gradient::gradient(&problem, &vec![0.0, 0.0]);
    assert_relative_eq!(gradient.as_slice(), [-2.0, 0.0].as_slice());
    assert_eq!(GradientSparsity::gradient_sparsity(&problem), [(0, 0), (0, 1)]);
}

#[test]
fn hessian_values_follow_the_sparsity_pattern() {
    let problem = Rosenbrock { dimension: 2 };

    let patterns = HessiansSparsity::hessians_sparsity(&problem);
    let hessians = Hessians::hessians(&problem, &vec![1.0, 1.0]);

    assert_eq!(patterns, [vec![(0, 0), (1, 0), (1, 1)]]);
    assert_eq!(hessians.len(), 1);
    assert_relative_eq!(hessians[0].as_slice(), [802.0, -400.0, 200.0].as_slice());
}

#[test]
fn invalid_decision_vectors_raise_decorated_errors() {
    let problem = Rosenbrock { dimension: 3 };

    let Error::Message(message) = evaluate(&problem, &vec![1.0, 1.0]).unwrap_err() else {
        panic!("expected a message error");
    };
    assert!(message.starts_with("\nfunction: rosenbrock::check_decision_vector\nwhere: "));
    assert!(message.ends_with(
        "\nwhat: decision vector has length 2 but the problem has dimension 3\n"
    ));

    let error = evaluate(&problem, &vec![0.0, 20.0, 0.0]).unwrap_err();
    assert!(error.to_string().ends_with("what: decision vector is outside the bounds\n"));
}

#[test]
fn missing_capabilities_are_reported() {
    let error = capabilities!(Rosenbrock)
        .require::<Rosenbrock>(Capability::Constraints)
        .unwrap_err();

    assert_eq!(
        error,
        Error::MissingCapability {
            type_name: "rosenbrock::Rosenbrock",
            capability: Capability::Constraints,
        }
    );
}
