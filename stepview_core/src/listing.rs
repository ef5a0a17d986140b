//! The fixed pseudocode listing the engine steps through.
//!
//! Line ids in engine snapshots index into this listing; a renderer
//! highlights the current line. The text is C-flavored pseudocode, and
//! the state machine's display mapping depends on these exact line
//! positions - reorder the listing and the highlights go wrong.

/// The 28-line Bellman-Ford listing.
pub const PSEUDOCODE: [&str; 28] = [
    "void BellmanFord(struct Edge edges[], int V, int E, int src) {",
    "    int dist[V];",
    "    // Step 1: Initialize distances from src to all other vertices as INFINITE",
    "    for (int i = 0; i < V; i++) {",
    "        dist[i] = INT_MAX;",
    "    }",
    "    dist[src] = 0;",
    "    // Step 2: Relax all edges |V| - 1 times",
    "    for (int i = 1; i <= V - 1; i++) {",
    "        for (int j = 0; j < E; j++) {",
    "            int u = edges[j].src;",
    "            int v = edges[j].dest;",
    "            int weight = edges[j].weight;",
    "            if (dist[u] != INT_MAX && dist[u] + weight < dist[v]) {",
    "                dist[v] = dist[u] + weight;",
    "            }",
    "        }",
    "    }",
    "    // Step 3: Check for negative-weight cycles",
    "    for (int i = 0; i < E; i++) {",
    "        int u = edges[i].src;",
    "        int v = edges[i].dest;",
    "        int weight = edges[i].weight;",
    "        if (dist[u] != INT_MAX && dist[u] + weight < dist[v]) {",
    "            printf(\"Graph contains negative weight cycle\");",
    "            return;",
    "        }",
    "    }",
];

/// Returns the listing text for a line id, if in range.
pub fn line_text(line: usize) -> Option<&'static str> {
    PSEUDOCODE.get(line).copied()
}
