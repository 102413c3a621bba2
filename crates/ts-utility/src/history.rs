use ts_core::PlanKind;

/// Last raw score per plan category and the plan that won.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UtilityHistory {
    scores: [f32; PlanKind::COUNT],
    winner: PlanKind,
    evaluations: u64,
}

impl UtilityHistory {
    #[inline]
    pub fn record(&mut self, plan: PlanKind, score: f32) {
        self.scores[plan.index()] = score;
    }

    pub(crate) fn finish(&mut self, winner: PlanKind) {
        self.winner = winner;
        self.evaluations += 1;
    }

    #[inline]
    pub fn score(&self, plan: PlanKind) -> f32 {
        self.scores[plan.index()]
    }

    #[inline]
    pub fn winner(&self) -> PlanKind {
        self.winner
    }

    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlanKind, f32)> + '_ {
        PlanKind::ALL.iter().map(|&p| (p, self.scores[p.index()]))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
