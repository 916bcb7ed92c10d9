use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    /// 1-based finishing position.
    pub rank: usize,
    pub id: String,
    pub raw: String,
    pub votes: Option<u64>,
}

/// Finishing order of every candidate; the first `top_n` are the winners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActualResult {
    pub standings: Vec<ResultEntry>,
    pub top_n: usize,
}

impl ActualResult {
    pub fn winners(&self) -> &[ResultEntry] {
        let n = self.top_n.min(self.standings.len());
        &self.standings[..n]
    }

    pub fn winner_ids(&self) -> Vec<&str> {
        self.winners().iter().map(|e| e.id.as_str()).collect()
    }

    pub fn is_winner(&self, id: &str) -> bool {
        self.winners().iter().any(|e| e.id == id)
    }

    /// Finishing position among the winners, if `id` is one.
    pub fn winner_rank(&self, id: &str) -> Option<usize> {
        self.winners().iter().find(|e| e.id == id).map(|e| e.rank)
    }

    /// Fewer candidates than seats: the analysis runs on a reduced
    /// denominator.
    pub fn is_complete(&self) -> bool {
        self.standings.len() >= self.top_n
    }
}
