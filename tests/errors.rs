// Test intent: verifies configuration, domain and shape validation, and that
// failed calls leave caller buffers untouched.

use core::f64::consts::TAU;
use kofft_nufft::{
    Buffer, Complex32, Complex64, ComplexNufftPlan, ConfigError, KernelKind, NufftConfig,
    NufftError, NufftPlan, RealNufftPlan,
};

#[test]
fn invalid_configurations() {
    let cases: [(usize, NufftConfig); 4] = [
        (0, NufftConfig::default()),
        (8, NufftConfig::new(0, 2.0, KernelKind::Gaussian)),
        (8, NufftConfig::new(4, 0.9, KernelKind::Gaussian)),
        (8, NufftConfig::new(4, f64::NAN, KernelKind::Gaussian)),
    ];
    for (n, config) in cases {
        let err = ComplexNufftPlan::<f64>::new(n, &config).err().unwrap();
        assert!(matches!(err, NufftError::Config(_)), "{err}");
    }
    let err = RealNufftPlan::<f64>::with_kernel(0, 4, 2.0, KernelKind::BSpline)
        .err()
        .unwrap();
    assert_eq!(err, NufftError::Config(ConfigError::ZeroSize));
}

#[test]
fn unsupported_kernel_for_precision() {
    // Kaiser-Bessel without oversampling has negative correction factors.
    let err = ComplexNufftPlan::<f64>::with_kernel(64, 8, 1.0, KernelKind::KaiserBessel)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        NufftError::Config(ConfigError::UnsupportedKernel { .. })
    ));

    // A wide Gaussian without oversampling spans more than f32 can resolve.
    let err = NufftPlan::<f32, Complex32>::with_kernel(64, 16, 1.0, KernelKind::Gaussian)
        .err()
        .unwrap();
    match err {
        NufftError::Config(ConfigError::UnsupportedKernel {
            kernel, precision, ..
        }) => {
            assert_eq!(kernel, KernelKind::Gaussian);
            assert_eq!(precision, "f32");
        }
        other => panic!("unexpected error {other}"),
    }
    assert!(NufftPlan::<f64, Complex64>::with_kernel(64, 16, 1.0, KernelKind::Gaussian).is_ok());
}

#[test]
fn execution_requires_points() {
    let mut plan = ComplexNufftPlan::<f64>::new(16, &NufftConfig::default()).unwrap();
    let mut out = vec![Complex64::new(0.0, 0.0); 16];
    assert_eq!(plan.exec_type1(&mut out, &[]), Err(NufftError::PointsNotSet));
    let spectrum = vec![Complex64::new(0.0, 0.0); 16];
    assert_eq!(plan.exec_type2(&mut [], &spectrum), Err(NufftError::PointsNotSet));
}

#[test]
fn coordinates_outside_domain() {
    let mut plan = RealNufftPlan::<f64>::new(16, &NufftConfig::default()).unwrap();
    for (bad, index) in [(-0.1, 1), (TAU, 2), (f64::NAN, 0), (f64::NEG_INFINITY, 2)] {
        let mut x = vec![0.5, 1.0, 2.0];
        x[index] = bad;
        match plan.set_points(&x) {
            Err(NufftError::Domain { index: i, value }) => {
                assert_eq!(i, index);
                assert!(value.is_nan() == bad.is_nan());
            }
            other => panic!("expected domain error, got {other:?}"),
        }
    }
    assert!(plan.points().is_none());
}

#[test]
fn shape_mismatches_leave_output_untouched() {
    let mut plan = ComplexNufftPlan::<f64>::new(16, &NufftConfig::default()).unwrap();
    plan.set_points(&[0.5, 1.5, 2.5]).unwrap();
    let sentinel = Complex64::new(7.0, -7.0);

    let mut out = vec![sentinel; 16];
    let values = vec![Complex64::new(1.0, 0.0); 2];
    assert_eq!(
        plan.exec_type1(&mut out, &values),
        Err(NufftError::ShapeMismatch {
            buffer: Buffer::Values,
            expected: 3,
            actual: 2
        })
    );
    assert!(out.iter().all(|c| *c == sentinel));

    let mut short = vec![sentinel; 15];
    let values = vec![Complex64::new(1.0, 0.0); 3];
    assert_eq!(
        plan.exec_type1(&mut short, &values),
        Err(NufftError::ShapeMismatch {
            buffer: Buffer::Output,
            expected: 16,
            actual: 15
        })
    );
    assert!(short.iter().all(|c| *c == sentinel));

    let mut out = vec![sentinel; 3];
    let spectrum = vec![Complex64::new(1.0, 0.0); 17];
    assert_eq!(
        plan.exec_type2(&mut out, &spectrum),
        Err(NufftError::ShapeMismatch {
            buffer: Buffer::Spectrum,
            expected: 16,
            actual: 17
        })
    );
    let spectrum = vec![Complex64::new(1.0, 0.0); 16];
    let mut long = vec![sentinel; 4];
    assert!(matches!(
        plan.exec_type2(&mut long, &spectrum),
        Err(NufftError::ShapeMismatch {
            buffer: Buffer::Output,
            ..
        })
    ));
    assert!(out.iter().chain(long.iter()).all(|c| *c == sentinel));
}

#[test]
fn real_plans_use_half_spectra() {
    let mut plan = RealNufftPlan::<f32>::new(10, &NufftConfig::default()).unwrap();
    plan.set_points(&[1.0, 2.0]).unwrap();
    let mut full = vec![Complex32::new(0.0, 0.0); 10];
    assert!(matches!(
        plan.exec_type1(&mut full, &[1.0, 2.0]),
        Err(NufftError::ShapeMismatch { expected: 6, .. })
    ));
}

#[test]
fn errors_display_and_source() {
    let err = NufftError::Domain {
        index: 3,
        value: 7.0,
    };
    assert!(err.to_string().contains("index 3"));
    let boxed: Box<dyn std::error::Error> =
        Box::new(NufftError::from(ConfigError::ZeroHalfSupport));
    assert!(boxed.source().is_some());
}
