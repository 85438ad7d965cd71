use fuzzy_toolbox::{
    parse_values, Defuzzification, FuzzyError, FuzzySet, FuzzySets, Implication, SetOp, Universe,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn dashboard_universe() -> Universe {
    Universe::linspace(0., 10., 200).unwrap()
}

fn sample_sets(universe: &Universe) -> Vec<FuzzySet> {
    vec![
        FuzzySet::triangular(universe, 2., 5., 8.).unwrap(),
        FuzzySet::trapezoidal(universe, 1., 3., 6., 9.).unwrap(),
        FuzzySet::gaussian(universe, 4., 1.5).unwrap(),
        FuzzySet::bell(universe, 2., 2., 6.).unwrap(),
        FuzzySet::sigmoid(universe, 1.5, 5.).unwrap(),
        FuzzySet::manual(universe, &[0., 0.3, 1., 0.6, 0.1]).unwrap(),
    ]
}

fn pairs(sets: &[FuzzySet]) -> impl Iterator<Item = (&FuzzySet, &FuzzySet)> {
    sets.iter().flat_map(move |a| sets.iter().map(move |b| (a, b)))
}

#[test]
fn test_triangular_is_piecewise_linear() {
    let universe = Universe::linspace(0., 10., 101).unwrap();
    let set = FuzzySet::triangular(&universe, 2., 5., 8.).unwrap();

    for (x, m) in set.iter() {
        if x < 2. || x > 8. {
            assert_eq!(m, 0., "x = {x}");
        } else if x <= 5. {
            assert!((m - (x - 2.) / 3.).abs() < 1e-9, "x = {x}");
        } else {
            assert!((m - (8. - x) / 3.).abs() < 1e-9, "x = {x}");
        }
    }

    assert!((set.membership_at(5.) - 1.).abs() < 1e-9);
}

#[test]
fn test_complement_is_an_involution() {
    let universe = dashboard_universe();

    for set in sample_sets(&universe) {
        assert_eq!(set.complement().complement(), set);
    }
}

#[test]
fn test_union_and_intersection_commute() {
    let universe = dashboard_universe();
    let sets = sample_sets(&universe);

    for (a, b) in pairs(&sets) {
        assert_eq!(a.union(b).unwrap().membership(), b.union(a).unwrap().membership());
        assert_eq!(
            a.intersection(b).unwrap().membership(),
            b.intersection(a).unwrap().membership()
        );
    }
}

#[test]
fn test_union_and_intersection_bounds() {
    let universe = dashboard_universe();
    let sets = sample_sets(&universe);

    for (a, b) in pairs(&sets) {
        let meet = a.intersection(b).unwrap();
        let join = a.union(b).unwrap();

        for i in 0..universe.len() {
            let (u, v) = (a.membership()[i], b.membership()[i]);

            assert!(meet.membership()[i] <= u && meet.membership()[i] <= v);
            assert!(join.membership()[i] >= u && join.membership()[i] >= v);
        }
    }
}

#[test]
fn test_bounded_sum_stays_in_unit_interval() {
    let universe = dashboard_universe();
    let sets = sample_sets(&universe);

    for (a, b) in pairs(&sets) {
        let sum = a.bounded_sum(b).unwrap();

        assert!(sum.membership().iter().all(|m| (0. ..=1.).contains(m)));
    }
}

#[test]
fn test_de_morgan_relations() {
    let universe = dashboard_universe();
    let sets = sample_sets(&universe);

    for (a, b) in pairs(&sets) {
        // ¬(A + B - AB) = ¬A · ¬B
        let lhs = a.algebraic_sum(b).unwrap().complement();
        let rhs = a.complement().algebraic_product(&b.complement()).unwrap();
        assert_eq!(lhs, rhs);

        // A - AB = A · ¬B
        let lhs = a.algebraic_difference(b).unwrap();
        let rhs = a.algebraic_product(&b.complement()).unwrap();
        assert_eq!(lhs, rhs);
    }
}

#[test]
fn test_symmetric_triangle_defuzzifies_to_its_center() {
    let set = FuzzySet::triangular(&dashboard_universe(), 2., 5., 8.).unwrap();

    assert!((set.centroid().unwrap() - 5.).abs() < 0.05);
    assert!((set.weighted_average().unwrap() - 5.).abs() < 0.05);
    assert!((set.center_of_sums().unwrap() - 5.).abs() < 0.05);
    assert!((set.center_of_area().unwrap() - 5.).abs() < 0.05);
    assert!((set.bisector().unwrap() - 5.).abs() < 0.1);
    assert!((set.membership_at(5.) - 1.).abs() < 0.02);
}

#[test]
fn test_gaussian_mean_of_maximum() {
    let set = FuzzySet::gaussian(&dashboard_universe(), 5., 1.).unwrap();
    let smallest = set.smallest_of_maximum().unwrap();
    let largest = set.largest_of_maximum().unwrap();

    assert!((set.mean_of_maximum().unwrap() - 5.).abs() < 0.05);
    assert!(smallest <= largest);
}

#[test]
fn test_lambda_cut_extremes() {
    let universe = Universe::linspace(0., 10., 101).unwrap();
    let set = FuzzySet::triangular(&universe, 2., 5., 8.).unwrap();

    assert_eq!(set.lambda_cut(1.), set.core());
    assert_eq!(set.lambda_cut(1.).len(), 1);
    assert_eq!(set.lambda_cut(0.), universe.to_vec());
}

#[test]
fn test_height_method_weights_every_sample() {
    let universe = dashboard_universe();
    let set = FuzzySet::triangular(&universe, 1., 2., 3.).unwrap();
    let mean = universe.iter().sum::<f64>() / universe.len() as f64;

    assert!((set.height_method().unwrap() - mean).abs() < 1e-9);
}

#[test]
fn test_mamdani_of_identical_sets_is_the_set() {
    let universe = dashboard_universe();

    for set in sample_sets(&universe) {
        assert_eq!(set.mamdani_implication(&set).unwrap(), set);
    }
}

#[test]
fn test_implication_curves() {
    let universe = dashboard_universe();
    let a = FuzzySet::triangular(&universe, 2., 5., 8.).unwrap();
    let b = FuzzySet::gaussian(&universe, 6., 1.).unwrap();

    let zadeh = a.zadeh_implication(&b).unwrap();
    let larsen = a.larsen_implication(&b).unwrap();

    for i in 0..universe.len() {
        let (u, v) = (a.membership()[i], b.membership()[i]);

        assert_eq!(zadeh.membership()[i], f64::max(1. - u, v));
        assert_eq!(larsen.membership()[i], u * v);
    }
    assert_eq!(zadeh.label(), "ZadehImp(Triangular(2,5,8),Gaussian(6,1))");
}

#[test]
fn test_manual_on_matching_universe_is_exact() {
    let universe = Universe::new(vec![1., 2., 3., 4., 5.]).unwrap();
    let set = FuzzySet::manual(&universe, &[0., 1., 1., 0., 0.]).unwrap();

    assert_eq!(set.membership(), &[0., 1., 1., 0., 0.]);
}

#[test]
fn test_degenerate_inputs_are_errors() {
    init_tracing();

    let universe = dashboard_universe();

    assert!(matches!(
        FuzzySet::triangular(&universe, 5., 5., 8.),
        Err(FuzzyError::DegenerateShape { shape: "triangular", .. })
    ));
    assert!(matches!(
        FuzzySet::gaussian(&universe, 5., 0.),
        Err(FuzzyError::DegenerateShape { shape: "gaussian", .. })
    ));

    let empty = FuzzySet::new(universe.clone(), vec![0.; 200], "empty").unwrap();
    assert_eq!(empty.centroid(), Err(FuzzyError::ZeroMembershipMass));
    assert_eq!(empty.height_method(), Err(FuzzyError::ZeroMembershipMass));
    assert_eq!(empty.bisector(), Err(FuzzyError::ZeroMembershipMass));
}

#[test]
fn test_sets_are_shared_across_threads() {
    let universe = dashboard_universe();
    let a = FuzzySet::triangular(&universe, 2., 5., 8.).unwrap();
    let b = FuzzySet::gaussian(&universe, 6., 1.).unwrap();

    let results: Vec<FuzzySet> = std::thread::scope(|s| {
        let handles: Vec<_> = SetOp::ALL
            .into_iter()
            .map(|op| {
                let (a, b) = (&a, &b);
                s.spawn(move || a.apply(op, b).unwrap())
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (op, result) in SetOp::ALL.into_iter().zip(results) {
        assert_eq!(result, a.apply(op, &b).unwrap());
    }
}

#[test]
fn test_dashboard_session() {
    init_tracing();

    let universe = dashboard_universe();
    let mut sets = FuzzySets::new();

    let values = parse_values("0, 0.4, 1, 0.4, 0").unwrap();
    sets.insert("manual", FuzzySet::manual(&universe, &values).unwrap());
    sets.insert("warm", FuzzySet::triangular(&universe, 2., 5., 8.).unwrap());

    let a = sets.get("warm").unwrap();
    let b = sets.get("manual").unwrap();

    let op: SetOp = "Bounded Difference".parse().unwrap();
    let result = a.apply(op, b).unwrap();
    assert!(result.membership().iter().all(|m| (0. ..=1.).contains(m)));

    let imp: Implication = "Larsen".parse().unwrap();
    let strength = a.membership_at(4.);
    let fired = imp.fire(strength, b);
    assert!((fired.height() - strength * b.height()).abs() < 1e-12);

    let method: Defuzzification = "Lambda-cut".parse().unwrap();
    let crisp = b.defuzzify(method).unwrap();
    assert!((crisp - 5.).abs() < 0.1);

    assert_eq!(
        parse_values("0.2, x"),
        Err(FuzzyError::InvalidValue { token: "x".to_owned() })
    );
}
