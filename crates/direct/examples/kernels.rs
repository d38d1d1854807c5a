//! Runs each kernel on a small literal matrix and prints the factors.
use direct::{back_substitution, cholesky, extract_lu, lu_factorize, lu_factorize_pivoted, Tolerance};
use nalgebra::{matrix, vector};

fn main() {
    pretty_env_logger::init();

    let mat_a = matrix![
        2.0, -1.0, 3.0;
        4.0, 2.0, 1.0;
        -2.0, 1.0, 2.0;
    ];

    match lu_factorize(&mat_a).and_then(|packed| extract_lu(&packed).map(|lu| (packed, lu))) {
        Ok((packed, (mat_l, mat_u))) => {
            println!("A after LU:{}", packed);
            println!("L ={}", mat_l);
            println!("U ={}", mat_u);
            println!("Reconstructed A ={}", mat_l * mat_u);
            println!("Difference ={}", mat_l * mat_u - mat_a);
        }
        Err(e) => println!("LU failed: {}", e),
    }

    match lu_factorize_pivoted(&mat_a) {
        Ok(lu) => {
            println!("P ={}", lu.p);
            println!("L ={}", lu.l);
            println!("U ={}", lu.u);
            println!("Difference P A - L U ={}", lu.p * mat_a - lu.l * lu.u);
        }
        Err(e) => println!("Pivoted LU failed: {}", e),
    }

    let mat_u = matrix![
        2.0, -1.0, 3.0;
        0.0, 1.0, 4.0;
        0.0, 0.0, -2.0;
    ];
    let b = vector![5.0, 6.0, -4.0];
    match back_substitution(&mat_u, &b, &Tolerance::default()) {
        Ok(x) => println!("Solution x ={}", x),
        Err(e) => println!("Back substitution failed: {}", e),
    }

    let tol = Tolerance::default();
    let cases = [
        (
            "symmetric positive definite",
            matrix![4.0, 1.0, 2.0; 1.0, 2.0, 0.0; 2.0, 0.0, 3.0],
        ),
        (
            "symmetric but not positive definite",
            matrix![0.0, 0.0, 0.0; 0.0, 1.0, 0.0; 0.0, 0.0, 1.0],
        ),
        (
            "not self-adjoint",
            matrix![1.0, 2.0, 0.0; 3.0, 4.0, 0.0; 0.0, 0.0, 1.0],
        ),
    ];
    for (name, mat) in cases {
        match cholesky(&mat, &tol) {
            Ok(mat_l) => {
                println!("{}: L ={}", name, mat_l);
                println!("L Lᵗ ={}", mat_l * mat_l.transpose());
            }
            Err(e) => println!("{}: {}", name, e),
        }
    }
}
