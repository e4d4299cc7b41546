//! Reseedable 3D gradient noise: classic Perlin and simplex.
//!
//! Both functions read one shared permutation table. Reseeding rebuilds that
//! table from the identity permutation, so the output is a pure function of
//! `(seed, x, y, z)`: the same seed always yields bit-identical samples no
//! matter how many times or with what the table was seeded before.

use serde::{Deserialize, Serialize};

/// Modulus of the Park–Miller generator driving the shuffle (2³¹ − 1).
const LCG_MODULUS: i64 = 2_147_483_647;
/// Multiplier of the Park–Miller generator.
const LCG_MULTIPLIER: i64 = 16_807;

/// Simplex skew factor for three dimensions.
const F3: f64 = 1.0 / 3.0;
/// Simplex unskew factor for three dimensions.
const G3: f64 = 1.0 / 6.0;

/// Which gradient-noise function the flow grid samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    Perlin,
    #[default]
    Simplex,
}

impl NoiseMode {
    /// Parses `"perlin"` / `"simplex"` (case insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "perlin" => Some(NoiseMode::Perlin),
            "simplex" => Some(NoiseMode::Simplex),
            _ => None,
        }
    }

    /// Lowercase name accepted by [`NoiseMode::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            NoiseMode::Perlin => "perlin",
            NoiseMode::Simplex => "simplex",
        }
    }
}

/// Permutation-table gradient noise generator.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perm: [u8; 512],
    seed: f64,
}

impl NoiseField {
    /// Creates a generator already seeded with `seed`.
    pub fn new(seed: f64) -> Self {
        let mut field = Self {
            perm: [0; 512],
            seed,
        };
        field.seed(seed);
        field
    }

    /// The value most recently passed to [`NoiseField::seed`].
    pub fn current_seed(&self) -> f64 {
        self.seed
    }

    /// Rebuilds the permutation table from `value`.
    ///
    /// Values in `(0, 1)` are scaled by 65536 first, then floored. Small
    /// seeds (below 256) are spread into the high byte so they still stir the
    /// generator. The table is shuffled with a Fisher–Yates pass driven by a
    /// Park–Miller generator and duplicated to 512 entries.
    pub fn seed(&mut self, value: f64) {
        let mut scaled = value;
        if scaled > 0.0 && scaled < 1.0 {
            scaled *= 65536.0;
        }
        let mut s = scaled.floor() as i64;
        if s < 256 {
            s |= s << 8;
        }
        s %= LCG_MODULUS;

        let mut permutation: [u8; 256] = std::array::from_fn(|i| i as u8);
        for i in (1..256).rev() {
            s = (s * LCG_MULTIPLIER) % LCG_MODULUS;
            let r = (s & 0xffff) as f64 / 65536.0;
            let j = (r * (i + 1) as f64).floor() as usize;
            permutation.swap(i, j);
        }
        for (i, slot) in self.perm.iter_mut().enumerate() {
            *slot = permutation[i & 255];
        }
        self.seed = value;
        tracing::debug!(seed = value, "reseeded noise permutation");
    }

    /// Samples with the function selected by `mode`.
    pub fn sample(&self, mode: NoiseMode, x: f64, y: f64, z: f64) -> f64 {
        match mode {
            NoiseMode::Perlin => self.perlin3(x, y, z),
            NoiseMode::Simplex => self.simplex3(x, y, z),
        }
    }

    /// Classic 3D Perlin noise, nominally in `[-1, 1]`. Zero on every lattice point.
    pub fn perlin3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let (xi, yi, zi) = (lattice(fx), lattice(fy), lattice(fz));
        let (x, y, z) = (x - fx, y - fy, z - fz);
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            lerp(
                lerp(grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z), u),
                lerp(
                    grad(p[ab], x, y - 1.0, z),
                    grad(p[bb], x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }

    /// 3D simplex noise scaled by 32 to roughly `[-1, 1]`.
    ///
    /// The scale is the customary approximation, not a proven bound.
    pub fn simplex3(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();
        let t = (i + j + k) * G3;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);

        // Second and third corners of the simplex, in lattice offsets.
        let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
            if y0 >= z0 {
                ((1, 0, 0), (1, 1, 0))
            } else if x0 >= z0 {
                ((1, 0, 0), (1, 0, 1))
            } else {
                ((0, 0, 1), (1, 0, 1))
            }
        } else if y0 < z0 {
            ((0, 0, 1), (0, 1, 1))
        } else if x0 < z0 {
            ((0, 1, 0), (0, 1, 1))
        } else {
            ((0, 1, 0), (1, 1, 0))
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let (ii, jj, kk) = (lattice(i), lattice(j), lattice(k));
        let p = &self.perm;
        let hash = |di: usize, dj: usize, dk: usize| -> u8 {
            p[ii + di + p[jj + dj + p[kk + dk] as usize] as usize]
        };

        let n0 = corner(hash(0, 0, 0), x0, y0, z0);
        let n1 = corner(hash(i1, j1, k1), x1, y1, z1);
        let n2 = corner(hash(i2, j2, k2), x2, y2, z2);
        let n3 = corner(hash(1, 1, 1), x3, y3, z3);

        32.0 * (n0 + n1 + n2 + n3)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Wraps a floored coordinate into the 0..=255 lattice index range.
fn lattice(floored: f64) -> usize {
    (floored as i64 & 255) as usize
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Dot product with one of 12 edge gradients picked by the low 4 hash bits.
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Radial kernel `(0.6 - r²)⁴` times the corner gradient; zero outside.
fn corner(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let mut t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        return 0.0;
    }
    t *= t;
    t * t * grad(hash, x, y, z)
}
