use super::*;

#[test]
fn default_penalties_satisfy_expected_ordering() {
    let p = Penalties::default_values();
    assert!(p.p_135 <= p.p_90);
    assert!(p.p_90 <= p.p_45);
    assert!(p.p_45 <= p.p_180);
}

#[test]
fn c0_is_the_45_135_gap() {
    let p = Penalties::default_values();
    assert_eq!(p.c0(), p.p_45 - p.p_135);
}

#[test]
fn pen_per_grid_is_3_plus_c0_plus_the_pricier_grid_penalty() {
    let p = Penalties::default_values();
    assert_eq!(
        p.pen_per_grid(),
        3.0 + p.c0() + p.horizontal_pen.max(p.diagonal_pen)
    );
}

#[test]
fn config_new_passes_validation() {
    let cfg = Config::new(10.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn negative_grid_size_is_rejected() {
    let mut cfg = Config::new(10.0);
    cfg.grid_size = -1.0;
    assert!(matches!(cfg.validate(), Err(OctiError::InvalidConfig(_))));
}

#[test]
fn zero_grid_size_is_rejected() {
    let mut cfg = Config::new(10.0);
    cfg.grid_size = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn non_finite_penalty_is_rejected() {
    let mut cfg = Config::new(10.0);
    cfg.penalties.p_45 = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn negative_penalty_is_rejected() {
    let mut cfg = Config::new(10.0);
    cfg.penalties.p_180 = -0.1;
    assert!(cfg.validate().is_err());
}

#[test]
fn bad_radius_growth_bounds_are_rejected() {
    let mut cfg = Config::new(10.0);
    cfg.radius_grow_start = 10.0;
    cfg.radius_grow_max = 5.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn zero_worker_threads_is_rejected() {
    let mut cfg = Config::new(10.0);
    cfg.worker_threads = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn non_positive_convergence_eps_is_rejected() {
    let mut cfg = Config::new(10.0);
    cfg.convergence_eps = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn heuristic_is_the_default_backend() {
    assert_eq!(Backend::default(), Backend::Heuristic);
}
