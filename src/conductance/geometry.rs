//! Conduit geometry
//!
//! A conduit is the series path *half pore 1 → throat → half pore 2*. Its
//! geometry is gathered from the network for a list of target throats:
//!
//! ```text
//!   pore1          throat          pore2
//! [ A1, L1 ] ── [ At, Lt ] ── [ A2, L2 ]
//! ```
//!
//! Every array is aligned with the target list: entry `i` belongs to
//! `throats[i]`. A segment of zero length has no resistance; formulas check
//! [`ConduitGeometry::is_open`] and assign it an infinite conductance instead
//! of dividing by zero.

use nalgebra::DVector;

use crate::conductance::keys::ConduitKeys;
use crate::error::ConductanceResult;
use crate::network::Network;

/// One of the three segments of a conduit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Pore1,
    Throat,
    Pore2,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Pore1, Segment::Throat, Segment::Pore2];

    /// Position in `[pore1, throat, pore2]` ordered arrays
    pub fn index(self) -> usize {
        match self {
            Segment::Pore1 => 0,
            Segment::Throat => 1,
            Segment::Pore2 => 2,
        }
    }
}

/// Areas and lengths of a set of conduits
#[derive(Debug, Clone)]
pub struct ConduitGeometry {
    /// Target throats
    throats: Vec<usize>,

    /// `[pore1, pore2]` of each target throat
    conns: Vec<[usize; 2]>,

    /// Cross-sectional areas `[A1, At, A2]`
    areas: [DVector<f64>; 3],

    /// Segment lengths `[L1, Lt, L2]`
    lengths: [DVector<f64>; 3],
}

impl ConduitGeometry {
    /// Gather conduit geometry for `throats`
    ///
    /// # Errors
    ///
    /// - `InvalidPropertyName` if a key has the wrong `pore.`/`throat.` prefix
    /// - `ThroatOutOfRange` if a target throat does not exist
    /// - `PropertyNotFound` if an area or length array is missing from the
    ///   network (geometry is never interpolated)
    pub fn resolve(
        network: &Network,
        keys: &ConduitKeys,
        throats: &[usize],
    ) -> ConductanceResult<Self> {
        keys.validate()?;
        network.check_throats(throats)?;

        let conns: Vec<[usize; 2]> = throats.iter().map(|&t| network.throat_conns(t)).collect();

        let pore_area = network.require(&keys.pore_area)?;
        let throat_area = network.require(&keys.throat_area)?;
        let [l1_key, lt_key, l2_key] = keys.length_keys();

        let areas = [
            DVector::from_iterator(conns.len(), conns.iter().map(|c| pore_area[c[0]])),
            gather(&throat_area, throats),
            DVector::from_iterator(conns.len(), conns.iter().map(|c| pore_area[c[1]])),
        ];
        let lengths = [
            gather(&network.require(&l1_key)?, throats),
            gather(&network.require(&lt_key)?, throats),
            gather(&network.require(&l2_key)?, throats),
        ];

        let degenerate = lengths
            .iter()
            .map(|l| l.iter().filter(|&&v| v == 0.0).count())
            .sum::<usize>();
        if degenerate > 0 {
            log::debug!("{degenerate} zero-length conduit segment(s) treated as resistance-free");
        }

        Ok(Self {
            throats: throats.to_vec(),
            conns,
            areas,
            lengths,
        })
    }

    /// Number of conduits
    pub fn len(&self) -> usize {
        self.throats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throats.is_empty()
    }

    pub fn throats(&self) -> &[usize] {
        &self.throats
    }

    /// `[pore1, pore2]` of conduit `i`
    pub fn pores(&self, i: usize) -> [usize; 2] {
        self.conns[i]
    }

    pub fn area(&self, segment: Segment) -> &DVector<f64> {
        &self.areas[segment.index()]
    }

    pub fn length(&self, segment: Segment) -> &DVector<f64> {
        &self.lengths[segment.index()]
    }

    /// Whether segment `segment` of conduit `i` has a non-zero length
    pub fn is_open(&self, segment: Segment, i: usize) -> bool {
        self.lengths[segment.index()][i] != 0.0
    }

    /// Non-zero-length mask of a segment (`m1`, `mt`, `m2`)
    pub fn mask(&self, segment: Segment) -> Vec<bool> {
        self.length(segment).iter().map(|&l| l != 0.0).collect()
    }

    /// Total conduit length $L_1 + L_t + L_2$
    pub fn total_length(&self) -> DVector<f64> {
        &self.lengths[0] + &self.lengths[1] + &self.lengths[2]
    }

    /// Length-weighted mean cross-section $(A_1 L_1 + A_t L_t + A_2 L_2) / L$
    pub fn mean_cross_section(&self) -> DVector<f64> {
        let weighted = self.areas[0].component_mul(&self.lengths[0])
            + self.areas[1].component_mul(&self.lengths[1])
            + self.areas[2].component_mul(&self.lengths[2]);
        weighted.component_div(&self.total_length())
    }

    /// Values of a pore property at pore 1 and pore 2 of each conduit
    pub fn at_pores(&self, values: &DVector<f64>) -> [DVector<f64>; 2] {
        [0, 1].map(|side| {
            DVector::from_iterator(self.len(), self.conns.iter().map(|c| values[c[side]]))
        })
    }

    /// Values of a throat property at each conduit
    pub fn at_throats(&self, values: &DVector<f64>) -> DVector<f64> {
        gather(values, &self.throats)
    }

    /// Pressure-like difference `values[pore2] - values[pore1]` per conduit
    pub fn difference(&self, values: &DVector<f64>) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.conns.iter().map(|c| values[c[1]] - values[c[0]]))
    }
}

/// Values of a full-length array at `indices`
pub(crate) fn gather(values: &DVector<f64>, indices: &[usize]) -> DVector<f64> {
    DVector::from_iterator(indices.len(), indices.iter().map(|&i| values[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConductanceError;
    use approx::assert_relative_eq;

    fn network() -> Network {
        // 0 - 1 - 2
        let mut network = Network::new(3, vec![[0, 1], [1, 2]]).unwrap();
        network.set("pore.area", DVector::from_vec(vec![1.0, 2.0, 3.0])).unwrap();
        network.set("throat.area", DVector::from_vec(vec![0.5, 0.25])).unwrap();
        network.set("throat.conduit_lengths.pore1", DVector::from_vec(vec![0.0, 1.0])).unwrap();
        network.set("throat.conduit_lengths.throat", DVector::from_vec(vec![2.0, 3.0])).unwrap();
        network.set("throat.conduit_lengths.pore2", DVector::from_vec(vec![1.0, 1.0])).unwrap();
        network
    }

    #[test]
    fn test_resolve_aligns_with_target_order() {
        let geometry = ConduitGeometry::resolve(&network(), &ConduitKeys::default(), &[1, 0]).unwrap();
        assert_eq!(geometry.len(), 2);
        assert_eq!(geometry.pores(0), [1, 2]);
        assert_eq!(geometry.area(Segment::Pore1).as_slice(), &[2.0, 1.0]);
        assert_eq!(geometry.area(Segment::Throat).as_slice(), &[0.25, 0.5]);
        assert_eq!(geometry.area(Segment::Pore2).as_slice(), &[3.0, 2.0]);
        assert_eq!(geometry.length(Segment::Throat).as_slice(), &[3.0, 2.0]);
    }

    #[test]
    fn test_masks_flag_zero_length_segments() {
        let geometry = ConduitGeometry::resolve(&network(), &ConduitKeys::default(), &[0, 1]).unwrap();
        assert_eq!(geometry.mask(Segment::Pore1), vec![false, true]);
        assert_eq!(geometry.mask(Segment::Throat), vec![true, true]);
        assert!(!geometry.is_open(Segment::Pore1, 0));
    }

    #[test]
    fn test_derived_lengths_and_cross_section() {
        let geometry = ConduitGeometry::resolve(&network(), &ConduitKeys::default(), &[0, 1]).unwrap();
        assert_eq!(geometry.total_length().as_slice(), &[3.0, 5.0]);
        // Throat 0: (1*0 + 0.5*2 + 2*1) / 3 = 1
        // Throat 1: (2*1 + 0.25*3 + 3*1) / 5 = 1.15
        let s = geometry.mean_cross_section();
        assert_relative_eq!(s[0], 1.0);
        assert_relative_eq!(s[1], 1.15);
    }

    #[test]
    fn test_pore_and_throat_lookups() {
        let geometry = ConduitGeometry::resolve(&network(), &ConduitKeys::default(), &[1]).unwrap();
        let pressure = DVector::from_vec(vec![10.0, 7.0, 1.0]);
        let [p1, p2] = geometry.at_pores(&pressure);
        assert_eq!((p1[0], p2[0]), (7.0, 1.0));
        assert_eq!(geometry.difference(&pressure)[0], -6.0);
        assert_eq!(geometry.at_throats(&DVector::from_vec(vec![4.0, 5.0]))[0], 5.0);
    }

    #[test]
    fn test_missing_length_array() {
        let mut network = Network::new(2, vec![[0, 1]]).unwrap();
        network.set("pore.area", 1.0).unwrap();
        network.set("throat.area", 1.0).unwrap();
        let err = ConduitGeometry::resolve(&network, &ConduitKeys::default(), &[0]).unwrap_err();
        assert_eq!(err, ConductanceError::property_not_found("throat.conduit_lengths.pore1"));
    }

    #[test]
    fn test_swapped_area_key() {
        let keys = ConduitKeys {
            pore_area: "throat.area".to_string(),
            ..ConduitKeys::default()
        };
        let err = ConduitGeometry::resolve(&network(), &keys, &[0, 1]).unwrap_err();
        assert_eq!(err, ConductanceError::InvalidPropertyName("throat.area".to_string()));
    }

    #[test]
    fn test_out_of_range_throat() {
        let err = ConduitGeometry::resolve(&network(), &ConduitKeys::default(), &[2]).unwrap_err();
        assert_eq!(err, ConductanceError::ThroatOutOfRange { throat: 2, nt: 2 });
    }
}
